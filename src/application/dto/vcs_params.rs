use super::VcsProvider;

/// Where the pull request lives and how to reach it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcsParams {
    pub provider: VcsProvider,
    /// API endpoint; empty means the provider's public SaaS endpoint
    pub api_endpoint: String,
    pub token: String,
    pub owner: String,
    pub repository: String,
    pub pull_request_id: u64,
    /// Branch the pull request merges into; `None` skips the baseline scan
    pub target_branch: Option<String>,
}
