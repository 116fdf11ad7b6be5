use compbuild_core::{Environment, ImageSpec};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// デフォルトのビルドツール
pub const DEFAULT_TOOL: &str = "docker";

/// 機密情報を含む可能性のあるビルド引数名
const SENSITIVE_PATTERNS: &[&str] = &["password", "token", "secret", "api_key", "private_key"];

/// 1イメージ分の解決済みビルドコマンド
///
/// `{tool} build -t {tag} -f {dockerfile} [--build-arg K=V]... [extra]... {context}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    pub image: String,
    pub tool: String,
    pub tag: String,
    pub dockerfile: PathBuf,
    pub context: PathBuf,
    pub build_args: Vec<(String, String)>,
    /// ビルドツールにそのまま渡す追加引数
    pub extra_args: Vec<String>,
    /// 子プロセスに追加する環境変数（`.env` 由来）
    pub envs: Vec<(String, String)>,
}

impl BuildCommand {
    /// イメージ定義と環境からコマンドを組み立てる
    pub fn resolve(
        image: &ImageSpec,
        project_root: &Path,
        env: &Environment,
        tool: &str,
        extra_args: &[String],
    ) -> Self {
        let build_args = image.resolve_build_args(env);
        for (key, _) in &build_args {
            warn_if_sensitive(key);
        }

        Self {
            image: image.name.to_string(),
            tool: tool.to_string(),
            tag: image.tag(),
            dockerfile: image.dockerfile_path(project_root),
            context: image.context_path(project_root),
            build_args,
            extra_args: extra_args.to_vec(),
            envs: env.exported(),
        }
    }

    /// ツールに渡す引数列
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "build".into(),
            "-t".into(),
            self.tag.clone().into(),
            "-f".into(),
            self.dockerfile.clone().into(),
        ];

        for (key, value) in &self.build_args {
            args.push("--build-arg".into());
            args.push(format!("{}={}", key, value).into());
        }

        args.extend(self.extra_args.iter().map(OsString::from));
        args.push(self.context.clone().into());
        args
    }
}

impl fmt::Display for BuildCommand {
    /// シェルに貼り付けられる形式で表示
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.tool))?;
        for arg in self.args() {
            write!(f, " {}", shell_quote(&arg.to_string_lossy()))?;
        }
        Ok(())
    }
}

fn shell_quote(s: &str) -> String {
    let safe = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,@+".contains(c));
    if safe {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

/// 機密情報を含みそうなビルド引数名か
fn is_sensitive(key: &str) -> bool {
    let key_lower = key.to_lowercase();
    SENSITIVE_PATTERNS.iter().any(|p| key_lower.contains(p))
}

/// ビルド引数の検証（機密情報の警告）
fn warn_if_sensitive(key: &str) {
    if is_sensitive(key) {
        tracing::warn!(
            build_arg = %key,
            "ビルド引数はイメージ履歴に記録されます。機密情報には環境変数やシークレットマウントを使用してください"
        );
    }
}
