/// Mock implementations for testing
mod mock_command_runner;
mod mock_progress_reporter;
mod mock_vcs_client;

pub use mock_command_runner::MockCommandRunner;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_vcs_client::MockVcsClient;
