use crate::ports::outbound::{CommandOutput, CommandRunner};
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// TokioCommandRunner adapter running child processes with tokio
///
/// Output is captured rather than inherited so it can be attached to error
/// messages.
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[String], dir: &Path) -> Result<CommandOutput> {
        tracing::debug!(program, ?args, dir = %dir.display(), "Running command");

        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Failed to start '{}' in {}", program, dir.display()))?;

        Ok(CommandOutput {
            status_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
