use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::VcsProvider;

/// Scan pull requests for newly introduced vulnerabilities and license violations
#[derive(Parser, Debug)]
#[command(name = "pr-vuln-gate")]
#[command(version)]
#[command(
    about = "Scan pull requests for newly introduced vulnerabilities and license violations",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the config file (defaults to pr-vuln-gate.yml in the repository root)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Checkout of the pull request head (defaults to current directory)
    #[arg(long, global = true, default_value = ".")]
    pub repo_root: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Render reports without publishing them to the pull request
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Also write rendered reports to this file
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Abort the run after this many seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan the pull request and comment the issues it introduces
    #[command(alias = "spr")]
    ScanPullRequest(ScanPullRequestArgs),

    /// Check that the deployment environment guarding the scan requires reviewers
    VerifyEnvironment(VerifyEnvironmentArgs),
}

/// Repository coordinates shared by every subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct VcsArgs {
    /// VCS provider: github or gitlab
    #[arg(long, env = "PR_VULN_GATE_GIT_PROVIDER", default_value = "github")]
    pub git_provider: VcsProvider,

    /// API endpoint (defaults to the provider's public endpoint)
    #[arg(long, env = "PR_VULN_GATE_GIT_API_ENDPOINT", default_value = "")]
    pub git_api_endpoint: String,

    /// API token
    #[arg(
        long,
        env = "PR_VULN_GATE_GIT_TOKEN",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub git_token: String,

    /// Repository owner (user, organization or group)
    #[arg(long, env = "PR_VULN_GATE_GIT_OWNER")]
    pub git_owner: String,

    /// Repository name
    #[arg(long, env = "PR_VULN_GATE_GIT_REPO")]
    pub git_repo: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ScanPullRequestArgs {
    #[command(flatten)]
    pub vcs: VcsArgs,

    /// Pull request (merge request) number
    #[arg(long, env = "PR_VULN_GATE_PULL_REQUEST_ID")]
    pub pull_request_id: u64,

    /// Branch the pull request merges into; without it all issues are reported
    #[arg(long, env = "PR_VULN_GATE_TARGET_BRANCH")]
    pub target_branch: Option<String>,

    /// Fail when new issues are found, regardless of the config file
    #[arg(long)]
    pub fail_on_security_issues: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct VerifyEnvironmentArgs {
    #[command(flatten)]
    pub vcs: VcsArgs,

    /// Deployment environment to verify (defaults to the config file's)
    #[arg(long)]
    pub environment: Option<String>,

    /// Whether the run happens inside GitHub Actions
    #[arg(long, env = "GITHUB_ACTIONS")]
    pub github_actions: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
