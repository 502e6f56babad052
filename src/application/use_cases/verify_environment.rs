use crate::adapters::outbound::network::GITHUB_API_ENDPOINT;
use crate::application::dto::{VcsProvider, VerifyEnvironmentRequest};
use crate::ports::outbound::VcsClient;
use crate::shared::error::GateError;
use crate::shared::Result;

/// VerifyEnvironmentUseCase - Checks the deployment environment guarding
/// pull request scans
///
/// On GitHub Actions, pull requests from forks get secrets only through a
/// protected environment. The check makes sure that environment exists and
/// requires at least one reviewer.
pub struct VerifyEnvironmentUseCase<V> {
    vcs_client: V,
}

impl<V: VcsClient> VerifyEnvironmentUseCase<V> {
    pub fn new(vcs_client: V) -> Self {
        Self { vcs_client }
    }

    /// Whether the check applies: GitHub Actions against public GitHub
    pub fn applies_to(request: &VerifyEnvironmentRequest) -> bool {
        request.running_in_github_actions
            && request.provider == VcsProvider::GitHub
            && Self::is_public_github(&request.api_endpoint)
    }

    fn is_public_github(api_endpoint: &str) -> bool {
        let endpoint = api_endpoint.trim().trim_end_matches('/');
        endpoint.is_empty() || endpoint == GITHUB_API_ENDPOINT
    }

    /// Runs the verification
    ///
    /// # Errors
    /// - Repository info cannot be fetched
    /// - `GateError::MissingEnvironment` if the environment lookup fails
    /// - `GateError::MissingReviewers` if the environment has no reviewers
    pub async fn execute(&self, request: &VerifyEnvironmentRequest) -> Result<()> {
        if !Self::applies_to(request) {
            tracing::debug!("Environment verification skipped");
            return Ok(());
        }

        self.vcs_client
            .get_repository_info(&request.owner, &request.repository)
            .await?;

        let environment = self
            .vcs_client
            .get_repository_environment_info(
                &request.owner,
                &request.repository,
                &request.environment,
            )
            .await
            .map_err(|e| GateError::MissingEnvironment {
                environment: request.environment.clone(),
                details: format!("{:#}", e),
            })?;

        if environment.reviewers.is_empty() {
            return Err(GateError::MissingReviewers {
                environment: request.environment.clone(),
            }
            .into());
        }

        tracing::info!(
            environment = %environment.name,
            reviewers = environment.reviewers.len(),
            "Environment verified"
        );
        Ok(())
    }
}
