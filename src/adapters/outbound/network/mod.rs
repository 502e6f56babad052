/// Network adapters for the VCS provider REST APIs
mod github_client;
mod gitlab_client;
mod http;

pub use github_client::{GitHubClient, GITHUB_API_ENDPOINT};
pub use gitlab_client::{GitLabClient, GITLAB_API_ENDPOINT};
