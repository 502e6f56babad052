use super::VcsProvider;

/// VerifyEnvironmentRequest - Request DTO for the environment verification
#[derive(Debug, Clone)]
pub struct VerifyEnvironmentRequest {
    /// Whether the process runs inside GitHub Actions (`GITHUB_ACTIONS=true`)
    pub running_in_github_actions: bool,
    pub provider: VcsProvider,
    pub api_endpoint: String,
    pub owner: String,
    pub repository: String,
    /// Deployment environment that guards pull requests from forks
    pub environment: String,
}
