/// Use cases module containing application business logic orchestration
mod install_dependencies;
mod scan_pull_request;
mod verify_environment;

pub use install_dependencies::InstallDependenciesUseCase;
pub use scan_pull_request::{
    resolve_working_dirs, ScanPullRequestUseCase, WorkingDir, COMMENT_MARKER,
};
pub use verify_environment::VerifyEnvironmentUseCase;
