use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// Repository metadata returned by the VCS provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryInfo {
    pub default_branch: String,
    pub private: bool,
}

/// A deployment environment and the users/teams allowed to approve it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryEnvironmentInfo {
    pub name: String,
    pub reviewers: Vec<String>,
}

/// A comment attached to a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentInfo {
    pub id: u64,
    pub content: String,
}

/// VcsClient port for talking to the hosting provider (GitHub, GitLab)
///
/// # Async Support
/// All methods are async. Implementations must be `Send + Sync` so a single
/// client can be shared by the use cases.
#[async_trait]
pub trait VcsClient: Send + Sync {
    /// Fetches general repository information
    async fn get_repository_info(&self, owner: &str, repository: &str) -> Result<RepositoryInfo>;

    /// Fetches a deployment environment and its reviewers
    ///
    /// # Errors
    /// Returns an error if the environment does not exist or the provider
    /// has no notion of environments
    async fn get_repository_environment_info(
        &self,
        owner: &str,
        repository: &str,
        environment: &str,
    ) -> Result<RepositoryEnvironmentInfo>;

    /// Downloads `branch` and extracts it into `local_path`
    ///
    /// The archive's top-level directory is stripped, so `local_path`
    /// becomes the repository root.
    async fn download_repository(
        &self,
        owner: &str,
        repository: &str,
        branch: &str,
        local_path: &Path,
    ) -> Result<()>;

    /// Lists the comments of a pull request
    async fn list_pull_request_comments(
        &self,
        owner: &str,
        repository: &str,
        pull_request_id: u64,
    ) -> Result<Vec<CommentInfo>>;

    /// Adds a new comment to a pull request
    async fn add_pull_request_comment(
        &self,
        owner: &str,
        repository: &str,
        content: &str,
        pull_request_id: u64,
    ) -> Result<()>;

    /// Replaces the body of an existing pull request comment
    async fn edit_pull_request_comment(
        &self,
        owner: &str,
        repository: &str,
        comment_id: u64,
        content: &str,
        pull_request_id: u64,
    ) -> Result<()>;
}

#[async_trait]
impl<T: VcsClient + ?Sized> VcsClient for Box<T> {
    async fn get_repository_info(&self, owner: &str, repository: &str) -> Result<RepositoryInfo> {
        (**self).get_repository_info(owner, repository).await
    }

    async fn get_repository_environment_info(
        &self,
        owner: &str,
        repository: &str,
        environment: &str,
    ) -> Result<RepositoryEnvironmentInfo> {
        (**self)
            .get_repository_environment_info(owner, repository, environment)
            .await
    }

    async fn download_repository(
        &self,
        owner: &str,
        repository: &str,
        branch: &str,
        local_path: &Path,
    ) -> Result<()> {
        (**self)
            .download_repository(owner, repository, branch, local_path)
            .await
    }

    async fn list_pull_request_comments(
        &self,
        owner: &str,
        repository: &str,
        pull_request_id: u64,
    ) -> Result<Vec<CommentInfo>> {
        (**self)
            .list_pull_request_comments(owner, repository, pull_request_id)
            .await
    }

    async fn add_pull_request_comment(
        &self,
        owner: &str,
        repository: &str,
        content: &str,
        pull_request_id: u64,
    ) -> Result<()> {
        (**self)
            .add_pull_request_comment(owner, repository, content, pull_request_id)
            .await
    }

    async fn edit_pull_request_comment(
        &self,
        owner: &str,
        repository: &str,
        comment_id: u64,
        content: &str,
        pull_request_id: u64,
    ) -> Result<()> {
        (**self)
            .edit_pull_request_comment(owner, repository, comment_id, content, pull_request_id)
            .await
    }
}
