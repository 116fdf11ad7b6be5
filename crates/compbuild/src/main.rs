use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use compbuild_build::{BuildError, DEFAULT_TOOL, Dispatcher, DryRunRunner, ProcessRunner};
use compbuild_core::env::DEFAULT_ENV_FILE;
use compbuild_core::{EnvFile, Environment, ImageCatalog, Target};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "compbuild", version)]
#[command(about = "コンポーネントのコンテナイメージをビルド", long_about = None)]
struct Cli {
    /// ビルドするイメージ名（省略時または all で全イメージ）
    image: Option<String>,

    /// プロジェクトルート（各コンポーネントのパスの基準）
    #[arg(long, env = "COMPBUILD_ROOT", default_value = ".")]
    root: PathBuf,

    /// 環境変数ファイル（デフォルト: <root>/.env）
    #[arg(long, env = "COMPBUILD_ENV_FILE")]
    env_file: Option<PathBuf>,

    /// 使用するビルドツール（docker, podman など）
    #[arg(long, env = "COMPBUILD_TOOL", default_value = DEFAULT_TOOL)]
    tool: String,

    /// 実行せずにビルドコマンドを表示
    #[arg(long)]
    dry_run: bool,

    /// ビルド可能なイメージの一覧を表示
    #[arg(long)]
    list: bool,

    /// ビルドツールに渡す追加引数（-- 以降）
    #[arg(last = true)]
    extra_args: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ログはstderrへ（stdoutはビルド出力用）
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let catalog = ImageCatalog::builtin();

    if cli.list {
        print_catalog(&catalog);
        return Ok(());
    }

    let env = load_environment(&cli.root, cli.env_file.as_deref())?;
    let target = Target::from_arg(cli.image.as_deref());

    let result = if cli.dry_run {
        println!("{}", "ドライラン: ビルドコマンドを表示します".yellow());
        let mut dispatcher = Dispatcher::new(catalog, env, cli.root.clone(), DryRunRunner::new())
            .with_tool(cli.tool.clone())
            .with_extra_args(cli.extra_args.clone());
        dispatcher
            .run(&target)
            .await
            .map(|_| print_dry_run_summary(dispatcher.runner().printed()))
    } else {
        Dispatcher::new(catalog, env, cli.root.clone(), ProcessRunner)
            .with_tool(cli.tool.clone())
            .with_extra_args(cli.extra_args.clone())
            .run(&target)
            .await
            .map(|built| print_summary(&built))
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) => exit_with(&e),
    }
}

/// `.env` を読み込み、プロセス環境変数と重ねる
fn load_environment(root: &Path, env_file: Option<&Path>) -> anyhow::Result<Environment> {
    let path = env_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join(DEFAULT_ENV_FILE));
    tracing::debug!(root = %root.display(), env_file = %path.display(), "Resolving environment");

    let file = EnvFile::load_optional(&path)
        .with_context(|| format!("環境変数ファイルを読み込めません: {}", path.display()))?;

    if let Some(p) = file.path() {
        println!(
            "🔐 環境変数ファイル: {} ({}個)",
            p.display().to_string().cyan(),
            file.len()
        );
    }

    Ok(Environment::from_process(file))
}

fn print_catalog(catalog: &ImageCatalog) {
    println!("{}", "ビルド可能なイメージ:".bold());
    for image in catalog.iter() {
        println!("  • {} ({})", image.name.cyan(), image.context);
        for arg in image.build_args {
            println!(
                "      --build-arg {}=${{{}:-{}}}",
                arg.name, arg.env_var, arg.default
            );
        }
    }
}

fn print_dry_run_summary(printed: usize) {
    println!();
    println!(
        "{}",
        format!("✓ {} 個のビルドコマンドを表示しました", printed)
            .green()
            .bold()
    );
}

fn print_summary(built: &[String]) {
    println!();
    println!(
        "{}",
        "✓ すべてのイメージがビルドされました！".green().bold()
    );
    println!();
    println!("{}", "結果サマリー:".bold());
    for tag in built {
        println!("  {} {}", "✓".green(), tag.cyan());
    }
}

/// エラーを表示し、対応する終了コードで終了
fn exit_with(error: &BuildError) -> ! {
    eprintln!();
    eprintln!("{} {}", "Error:".red().bold(), error.user_message());
    std::process::exit(error.exit_code());
}
