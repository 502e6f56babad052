use crate::adapters::outbound::network::{GitHubClient, GitLabClient};
use crate::application::dto::VcsProvider;
use crate::ports::outbound::VcsClient;
use crate::shared::Result;

/// Factory for creating the VCS client of the configured provider
pub struct VcsClientFactory;

impl VcsClientFactory {
    /// Creates a client for `provider`
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn create(
        provider: VcsProvider,
        api_endpoint: &str,
        token: &str,
    ) -> Result<Box<dyn VcsClient>> {
        let client: Box<dyn VcsClient> = match provider {
            VcsProvider::GitHub => Box::new(GitHubClient::new(api_endpoint, token)?),
            VcsProvider::GitLab => Box::new(GitLabClient::new(api_endpoint, token)?),
        };
        Ok(client)
    }
}
