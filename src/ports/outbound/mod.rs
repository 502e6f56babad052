/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (scanner, VCS provider, processes,
/// console).
pub mod command_runner;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod scanner;
pub mod vcs_client;

pub use command_runner::{CommandOutput, CommandRunner};
pub use formatter::ReportFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use scanner::Scanner;
pub use vcs_client::{CommentInfo, RepositoryEnvironmentInfo, RepositoryInfo, VcsClient};
