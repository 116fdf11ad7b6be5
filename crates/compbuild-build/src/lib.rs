//! compbuild のイメージビルド機能
//!
//! カタログから選択したイメージごとにビルドコマンドを組み立て、
//! 外部のコンテナビルドツール（docker / podman）を順番に実行します。

pub mod command;
pub mod dispatcher;
pub mod error;
pub mod runner;

pub use command::{BuildCommand, DEFAULT_TOOL};
pub use dispatcher::Dispatcher;
pub use error::{BuildError, BuildResult};
pub use runner::{BuildRunner, DryRunRunner, ProcessRunner};
