/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod output_style;
mod project;
mod scan_request;
mod scan_response;
mod vcs_params;
mod vcs_provider;
mod verify_environment_request;

pub use output_style::OutputStyle;
pub use project::{InstallCommand, Project};
pub use scan_request::ScanPullRequestRequest;
pub use scan_response::{CommentAction, DirectoryReport, ScanPullRequestResponse};
pub use vcs_params::VcsParams;
pub use vcs_provider::VcsProvider;
pub use verify_environment_request::VerifyEnvironmentRequest;
