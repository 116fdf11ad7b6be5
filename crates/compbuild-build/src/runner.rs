use crate::command::BuildCommand;
use crate::error::{BuildError, BuildResult};
use colored::Colorize;
use tokio::process::Command;

/// ビルドコマンドの実行方法
#[allow(async_fn_in_trait)]
pub trait BuildRunner {
    /// コマンドを1つ実行し、完了するまで待つ
    async fn run(&mut self, command: &BuildCommand) -> BuildResult<()>;
}

/// 外部プロセスとしてビルドツールを起動する
///
/// 標準入出力は親プロセスから引き継ぐため、ビルドログはそのまま表示されます。
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl BuildRunner for ProcessRunner {
    async fn run(&mut self, command: &BuildCommand) -> BuildResult<()> {
        tracing::debug!(command = %command, "Spawning build tool");

        let status = Command::new(&command.tool)
            .args(command.args())
            .envs(command.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .status()
            .await
            .map_err(|source| BuildError::Spawn {
                tool: command.tool.clone(),
                source,
            })?;

        if !status.success() {
            tracing::error!(image = %command.image, status = %status, "Build tool exited with failure");
            return Err(BuildError::BuildFailed {
                image: command.image.clone(),
                code: status.code(),
            });
        }

        Ok(())
    }
}

/// コマンドを表示するだけで実行しない（--dry-run）
#[derive(Debug, Default)]
pub struct DryRunRunner {
    printed: usize,
}

impl DryRunRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// 表示したコマンドの数
    pub fn printed(&self) -> usize {
        self.printed
    }
}

impl BuildRunner for DryRunRunner {
    async fn run(&mut self, command: &BuildCommand) -> BuildResult<()> {
        for (key, _) in &command.envs {
            println!("  {} env {}", "·".dimmed(), key);
        }
        println!("  {} {}", "$".dimmed(), command);
        self.printed += 1;
        Ok(())
    }
}
