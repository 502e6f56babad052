use crate::application::dto::Project;
use crate::ports::outbound::CommandRunner;
use crate::shared::error::GateError;
use crate::shared::Result;
use std::path::Path;

/// InstallDependenciesUseCase - Runs a project's configured install command
///
/// Some scanners resolve the dependency tree from installed packages, so
/// the project is installed before it is scanned.
pub struct InstallDependenciesUseCase<C> {
    command_runner: C,
}

impl<C: CommandRunner> InstallDependenciesUseCase<C> {
    pub fn new(command_runner: C) -> Self {
        Self { command_runner }
    }

    /// Installs `project` in `working_dir`
    ///
    /// Without a configured install command this succeeds without starting
    /// any process.
    ///
    /// # Arguments
    /// * `fail_on_error` - When false, a failed install is logged and ignored
    ///
    /// # Errors
    /// Returns `GateError::Install` if the command cannot be started or
    /// exits unsuccessfully and `fail_on_error` is set
    pub async fn install(&self, project: &Project, working_dir: &Path, fail_on_error: bool) -> Result<()> {
        let Some(command) = &project.install_command else {
            return Ok(());
        };

        tracing::info!(command = %command, dir = %working_dir.display(), "Installing dependencies");

        let failure = match self
            .command_runner
            .run(&command.program, &command.args, working_dir)
            .await
        {
            Ok(output) if output.success() => return Ok(()),
            Ok(output) => {
                let stderr = output.stderr.trim();
                let details = if stderr.is_empty() {
                    output.stdout.trim()
                } else {
                    stderr
                };
                format!("exit status {:?}: {}", output.status_code, details)
            }
            Err(e) => format!("{:#}", e),
        };

        if fail_on_error {
            return Err(GateError::Install {
                working_dir: working_dir.to_path_buf(),
                command: command.to_string(),
                details: failure,
            }
            .into());
        }

        tracing::warn!(
            command = %command,
            dir = %working_dir.display(),
            details = %failure,
            "Dependency install failed, continuing"
        );
        Ok(())
    }
}
