use crate::env::Environment;
use std::path::{Path, PathBuf};

/// 環境変数から値を取るビルド引数
///
/// 環境変数が未設定（または空文字）の場合は `default` が使われます。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildArg {
    /// `--build-arg` に渡す引数名
    pub name: &'static str,
    /// 値を読み取る環境変数名
    pub env_var: &'static str,
    pub default: &'static str,
}

impl BuildArg {
    pub const fn new(name: &'static str, env_var: &'static str, default: &'static str) -> Self {
        Self {
            name,
            env_var,
            default,
        }
    }

    /// 環境から値を解決
    pub fn resolve(&self, env: &Environment) -> String {
        env.get(self.env_var).unwrap_or(self.default).to_string()
    }
}

/// ビルド可能なコンテナイメージ1つ分の定義
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSpec {
    pub name: &'static str,
    /// プロジェクトルートからの相対パス
    pub dockerfile: &'static str,
    /// プロジェクトルートからの相対パス
    pub context: &'static str,
    pub build_args: &'static [BuildArg],
}

impl ImageSpec {
    /// ビルドされるイメージ参照 (`{name}:latest`)
    pub fn tag(&self) -> String {
        format!("{}:latest", self.name)
    }

    pub fn dockerfile_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(self.dockerfile)
    }

    pub fn context_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(self.context)
    }

    /// ビルド引数を宣言順に解決
    pub fn resolve_build_args(&self, env: &Environment) -> Vec<(String, String)> {
        self.build_args
            .iter()
            .map(|arg| (arg.name.to_string(), arg.resolve(env)))
            .collect()
    }
}
