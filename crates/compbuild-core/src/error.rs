use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("不明なイメージ名です: {name}\n利用可能なイメージ: {}", .known.join(", "))]
    UnknownImage { name: String, known: Vec<String> },

    #[error("環境変数ファイルの読み込みに失敗しました: {path}\n理由: {source}")]
    EnvFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    /// ユーザー向けの分かりやすいエラーメッセージ
    pub fn user_message(&self) -> String {
        match self {
            CoreError::UnknownImage { name, known } => {
                format!(
                    "不明なイメージ名です: {}\n\
                     \n\
                     利用可能なイメージ:\n  {}\n  all (すべてをビルド)",
                    name,
                    known.join("\n  ")
                )
            }
            _ => format!("{}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
