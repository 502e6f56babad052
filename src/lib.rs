//! pr-vuln-gate - Pull request security gate
//!
//! This library scans the dependencies of a pull request and of its target
//! branch, keeps only the vulnerabilities and policy violations the pull
//! request introduces, and publishes them as one comment per scan pass.
//! It follows hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`security_gate`): Scan results, issue identity and the delta engine
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use pr_vuln_gate::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! // Create adapters
//! let scanner = CommandScanner::new(
//!     "jf",
//!     vec!["audit".to_string(), "--format=json".to_string(), "--fail=false".to_string()],
//!     TokioCommandRunner::new(),
//! );
//! let vcs_client = GitHubClient::new(GITHUB_API_ENDPOINT, "token")?;
//!
//! // Create use case
//! let use_case = ScanPullRequestUseCase::new(
//!     scanner,
//!     vcs_client,
//!     TokioCommandRunner::new(),
//!     MarkdownReportFormatter::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! // Execute
//! let request = ScanPullRequestRequest {
//!     repo_root: PathBuf::from("."),
//!     projects: vec![Project::default()],
//!     vcs: VcsParams {
//!         provider: VcsProvider::GitHub,
//!         api_endpoint: String::new(),
//!         token: "token".to_string(),
//!         owner: "octo-org".to_string(),
//!         repository: "service".to_string(),
//!         pull_request_id: 42,
//!         target_branch: Some("main".to_string()),
//!     },
//!     fail_on_security_issues: true,
//!     dry_run: false,
//! };
//! let response = use_case.execute(request).await?;
//! println!("{} new issue(s)", response.new_issue_count());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod security_gate;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{
        MarkdownReportFormatter, SimplifiedReportFormatter,
    };
    pub use crate::adapters::outbound::network::{GitHubClient, GitLabClient, GITHUB_API_ENDPOINT};
    pub use crate::adapters::outbound::process::{CommandScanner, TokioCommandRunner};
    pub use crate::application::dto::{
        CommentAction, DirectoryReport, InstallCommand, OutputStyle, Project,
        ScanPullRequestRequest, ScanPullRequestResponse, VcsParams, VcsProvider,
        VerifyEnvironmentRequest,
    };
    pub use crate::application::use_cases::{
        InstallDependenciesUseCase, ScanPullRequestUseCase, COMMENT_MARKER,
        VerifyEnvironmentUseCase,
    };
    pub use crate::ports::outbound::{
        CommandOutput, CommandRunner, CommentInfo, OutputPresenter, ProgressReporter,
        ReportFormatter, RepositoryEnvironmentInfo, RepositoryInfo, Scanner, VcsClient,
    };
    pub use crate::security_gate::domain::{
        IssueRow, ScanMode, ScanParams, ScanResult, Severity,
    };
    pub use crate::security_gate::services::{DeltaEngine, ScanParamsBuilder};
    pub use crate::shared::error::{ExitCode, GateError};
    pub use crate::shared::Result;
}
