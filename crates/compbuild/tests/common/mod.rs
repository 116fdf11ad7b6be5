#![allow(deprecated)]

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write_env(&self, content: &str) {
        fs::write(self.root.path().join(".env"), content).unwrap();
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    /// プロジェクトルートで実行する compbuild コマンド
    ///
    /// 呼び出し元の環境変数が結果に影響しないように除去しておく。
    pub fn compbuild(&self) -> Command {
        let mut cmd = Command::cargo_bin("compbuild").unwrap();
        cmd.current_dir(self.path())
            .env("NO_COLOR", "1")
            .env_remove("USE_GPU")
            .env_remove("COMPBUILD_ROOT")
            .env_remove("COMPBUILD_ENV_FILE")
            .env_remove("COMPBUILD_TOOL");
        cmd
    }
}
