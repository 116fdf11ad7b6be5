use crate::command::{BuildCommand, DEFAULT_TOOL};
use crate::error::BuildResult;
use crate::runner::BuildRunner;
use colored::Colorize;
use compbuild_core::{Environment, ImageCatalog, Target};
use std::path::PathBuf;

/// ターゲットからビルドするイメージを選び、順番にビルドする
///
/// 最初に失敗したビルドで中止し、残りのイメージはビルドしません。
pub struct Dispatcher<R> {
    catalog: ImageCatalog,
    env: Environment,
    project_root: PathBuf,
    tool: String,
    extra_args: Vec<String>,
    runner: R,
}

impl<R: BuildRunner> Dispatcher<R> {
    pub fn new(catalog: ImageCatalog, env: Environment, project_root: PathBuf, runner: R) -> Self {
        Self {
            catalog,
            env,
            project_root,
            tool: DEFAULT_TOOL.to_string(),
            extra_args: Vec::new(),
            runner,
        }
    }

    /// ビルドツールを指定（docker / podman など）
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    /// ビルドツールにそのまま渡す追加引数
    pub fn with_extra_args(mut self, extra_args: Vec<String>) -> Self {
        self.extra_args = extra_args;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// ターゲットに対応するビルドコマンドを組み立てる（実行はしない）
    ///
    /// 不明なイメージ名の場合はコマンドを1つも返さずにエラーになります。
    pub fn plan(&self, target: &Target) -> BuildResult<Vec<BuildCommand>> {
        let images = self.catalog.select(target)?;

        Ok(images
            .into_iter()
            .map(|image| {
                BuildCommand::resolve(
                    image,
                    &self.project_root,
                    &self.env,
                    &self.tool,
                    &self.extra_args,
                )
            })
            .collect())
    }

    /// ビルドを順番に実行し、ビルドしたイメージタグを返す
    pub async fn run(&mut self, target: &Target) -> BuildResult<Vec<String>> {
        let commands = self.plan(target)?;
        let total = commands.len();
        tracing::info!(count = total, tool = %self.tool, "Starting image builds");

        let mut built = Vec::with_capacity(total);
        for (index, command) in commands.iter().enumerate() {
            println!();
            println!(
                "{}",
                format!("🔨 [{}/{}] {} をビルド中...", index + 1, total, command.image)
                    .green()
                    .bold()
            );
            println!(
                "  → Dockerfile: {}",
                command.dockerfile.display().to_string().cyan()
            );
            println!("  → Context: {}", command.context.display().to_string().cyan());
            println!("  → Image: {}", command.tag.cyan());

            if let Err(e) = self.runner.run(command).await {
                eprintln!("  {} {}", "✗".red().bold(), e);
                return Err(e);
            }

            println!("  {} ビルド完了", "✓".green());
            built.push(command.tag.clone());
        }

        tracing::info!(count = built.len(), "All image builds finished");
        Ok(built)
    }
}
