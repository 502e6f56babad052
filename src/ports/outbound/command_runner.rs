use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub status_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status_code == Some(0)
    }
}

/// CommandRunner port for executing external programs
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` in `dir` and waits for it to exit
    ///
    /// A non-zero exit is not an error at this level; callers inspect
    /// [`CommandOutput::success`].
    ///
    /// # Errors
    /// Returns an error if the process cannot be spawned
    async fn run(&self, program: &str, args: &[String], dir: &Path) -> Result<CommandOutput>;
}
