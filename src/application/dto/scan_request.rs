use super::{Project, VcsParams};
use std::path::PathBuf;

/// ScanPullRequestRequest - Request DTO for the pull request scan use case
#[derive(Debug, Clone)]
pub struct ScanPullRequestRequest {
    /// Checkout of the pull request head
    pub repo_root: PathBuf,
    pub projects: Vec<Project>,
    pub vcs: VcsParams,
    /// Fail the run when any new issue is found
    pub fail_on_security_issues: bool,
    /// Render reports without publishing them
    pub dry_run: bool,
}
