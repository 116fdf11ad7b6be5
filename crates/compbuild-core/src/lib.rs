//! compbuild のコア機能
//!
//! ビルド対象イメージの固定カタログ、`.env` ファイルの読み込み、
//! プロセス環境変数とのレイヤリングを提供します。

pub mod catalog;
pub mod env;
pub mod error;
pub mod model;

pub use catalog::{ImageCatalog, Target};
pub use env::{EnvFile, Environment};
pub use error::{CoreError, Result};
pub use model::{BuildArg, ImageSpec};
