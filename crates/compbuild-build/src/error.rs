use compbuild_core::CoreError;
use thiserror::Error;

/// 不明なイメージ名を指定した場合の終了コード
pub const EXIT_UNKNOWN_IMAGE: i32 = 2;
/// ビルドツールが見つからない場合の終了コード（シェルと同じ）
pub const EXIT_TOOL_NOT_FOUND: i32 = 127;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to launch build tool '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Build failed for image '{image}' (exit code: {})",
        .code.map_or_else(|| "signal".to_string(), |c| c.to_string())
    )]
    BuildFailed { image: String, code: Option<i32> },
}

impl BuildError {
    /// プロセスの終了コード
    ///
    /// ビルド失敗時はビルドツールの終了コードをそのまま返します。
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::Core(CoreError::UnknownImage { .. }) => EXIT_UNKNOWN_IMAGE,
            BuildError::Core(_) => 1,
            BuildError::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                EXIT_TOOL_NOT_FOUND
            }
            BuildError::Spawn { .. } => 1,
            BuildError::BuildFailed { code, .. } => code.filter(|c| *c != 0).unwrap_or(1),
        }
    }

    /// ユーザー向けの分かりやすいエラーメッセージ
    pub fn user_message(&self) -> String {
        match self {
            BuildError::Core(e) => e.user_message(),
            BuildError::Spawn { tool, source } => {
                format!(
                    "ビルドツール '{}' を起動できませんでした: {}\n\
                     \n\
                     解決方法:\n\
                     1. {} がインストールされ PATH に含まれているか確認してください\n\
                     2. --tool オプションか COMPBUILD_TOOL で別のツールを指定できます",
                    tool, source, tool
                )
            }
            BuildError::BuildFailed { image, code } => {
                format!(
                    "イメージ '{}' のビルドに失敗しました（終了コード: {}）\n\
                     \n\
                     残りのイメージのビルドは中止しました。",
                    image,
                    code.map_or_else(|| "シグナル".to_string(), |c| c.to_string())
                )
            }
        }
    }
}

pub type BuildResult<T> = std::result::Result<T, BuildError>;
