use super::http::{
    build_http_client, ensure_success, extract_archive, normalize_endpoint, transport_error,
    validate_path_segment,
};
use crate::ports::outbound::{CommentInfo, RepositoryEnvironmentInfo, RepositoryInfo, VcsClient};
use crate::shared::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Public GitHub REST API endpoint
pub const GITHUB_API_ENDPOINT: &str = "https://api.github.com";

const COMMENTS_PER_PAGE: usize = 100;

#[derive(Debug, Deserialize)]
struct GitHubRepository {
    #[serde(default)]
    default_branch: String,
    #[serde(default)]
    private: bool,
}

#[derive(Debug, Deserialize)]
struct GitHubEnvironment {
    name: String,
    #[serde(default)]
    protection_rules: Vec<GitHubProtectionRule>,
}

#[derive(Debug, Deserialize)]
struct GitHubProtectionRule {
    #[serde(rename = "type")]
    rule_type: String,
    #[serde(default)]
    reviewers: Vec<GitHubReviewer>,
}

#[derive(Debug, Deserialize)]
struct GitHubReviewer {
    #[serde(default)]
    reviewer: Option<GitHubReviewerIdentity>,
}

/// A reviewer is either a user (`login`) or a team (`slug`)
#[derive(Debug, Deserialize)]
struct GitHubReviewerIdentity {
    #[serde(default)]
    login: Option<String>,
    #[serde(default)]
    slug: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubComment {
    id: u64,
    #[serde(default)]
    body: Option<String>,
}

#[derive(Debug, Serialize)]
struct GitHubCommentBody<'a> {
    body: &'a str,
}

impl From<GitHubEnvironment> for RepositoryEnvironmentInfo {
    fn from(environment: GitHubEnvironment) -> Self {
        let reviewers = environment
            .protection_rules
            .into_iter()
            .filter(|rule| rule.rule_type == "required_reviewers")
            .flat_map(|rule| rule.reviewers)
            .filter_map(|reviewer| reviewer.reviewer)
            .filter_map(|identity| identity.login.or(identity.slug))
            .collect();

        RepositoryEnvironmentInfo {
            name: environment.name,
            reviewers,
        }
    }
}

/// GitHubClient adapter implementing the VcsClient port over the REST API
///
/// Works against github.com and GitHub Enterprise (`<host>/api/v3`).
pub struct GitHubClient {
    client: reqwest::Client,
    api_endpoint: String,
    token: String,
}

impl GitHubClient {
    /// Creates a client; an empty endpoint means the public API
    pub fn new(api_endpoint: &str, token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            api_endpoint: normalize_endpoint(api_endpoint, GITHUB_API_ENDPOINT),
            token: token.into(),
        })
    }

    fn repository_url(&self, owner: &str, repository: &str) -> Result<String> {
        validate_path_segment(owner, "Owner")?;
        validate_path_segment(repository, "Repository")?;
        Ok(format!("{}/repos/{}/{}", self.api_endpoint, owner, repository))
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if self.token.is_empty() {
            builder
        } else {
            builder.bearer_auth(&self.token)
        }
    }

    async fn send(&self, builder: reqwest::RequestBuilder, operation: &str) -> Result<reqwest::Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(operation, e))?;
        ensure_success(response, operation).await
    }
}

#[async_trait]
impl VcsClient for GitHubClient {
    async fn get_repository_info(&self, owner: &str, repository: &str) -> Result<RepositoryInfo> {
        let url = self.repository_url(owner, repository)?;
        let response = self
            .send(self.request(reqwest::Method::GET, &url), "get repository info")
            .await?;
        let repo: GitHubRepository = response.json().await?;

        Ok(RepositoryInfo {
            default_branch: repo.default_branch,
            private: repo.private,
        })
    }

    async fn get_repository_environment_info(
        &self,
        owner: &str,
        repository: &str,
        environment: &str,
    ) -> Result<RepositoryEnvironmentInfo> {
        let url = format!(
            "{}/environments/{}",
            self.repository_url(owner, repository)?,
            urlencoding::encode(environment)
        );
        let response = self
            .send(
                self.request(reqwest::Method::GET, &url),
                "get repository environment",
            )
            .await?;
        let environment: GitHubEnvironment = response.json().await?;
        Ok(environment.into())
    }

    async fn download_repository(
        &self,
        owner: &str,
        repository: &str,
        branch: &str,
        local_path: &Path,
    ) -> Result<()> {
        let url = format!("{}/tarball/{}", self.repository_url(owner, repository)?, branch);
        let response = self
            .send(self.request(reqwest::Method::GET, &url), "download repository")
            .await?;
        let bytes = response.bytes().await?;

        tracing::debug!(branch, size = bytes.len(), "Downloaded repository archive");
        extract_archive(bytes.to_vec(), local_path).await
    }

    async fn list_pull_request_comments(
        &self,
        owner: &str,
        repository: &str,
        pull_request_id: u64,
    ) -> Result<Vec<CommentInfo>> {
        let base = format!(
            "{}/issues/{}/comments",
            self.repository_url(owner, repository)?,
            pull_request_id
        );

        let mut comments = Vec::new();
        let mut page = 1;
        loop {
            let url = format!("{}?per_page={}&page={}", base, COMMENTS_PER_PAGE, page);
            let response = self
                .send(
                    self.request(reqwest::Method::GET, &url),
                    "list pull request comments",
                )
                .await?;
            let batch: Vec<GitHubComment> = response.json().await?;
            let batch_len = batch.len();
            comments.extend(batch.into_iter().map(|c| CommentInfo {
                id: c.id,
                content: c.body.unwrap_or_default(),
            }));
            if batch_len < COMMENTS_PER_PAGE {
                break;
            }
            page += 1;
        }
        Ok(comments)
    }

    async fn add_pull_request_comment(
        &self,
        owner: &str,
        repository: &str,
        content: &str,
        pull_request_id: u64,
    ) -> Result<()> {
        let url = format!(
            "{}/issues/{}/comments",
            self.repository_url(owner, repository)?,
            pull_request_id
        );
        self.send(
            self.request(reqwest::Method::POST, &url)
                .json(&GitHubCommentBody { body: content }),
            "add pull request comment",
        )
        .await?;
        Ok(())
    }

    async fn edit_pull_request_comment(
        &self,
        owner: &str,
        repository: &str,
        comment_id: u64,
        content: &str,
        _pull_request_id: u64,
    ) -> Result<()> {
        let url = format!(
            "{}/issues/comments/{}",
            self.repository_url(owner, repository)?,
            comment_id
        );
        self.send(
            self.request(reqwest::Method::PATCH, &url)
                .json(&GitHubCommentBody { body: content }),
            "edit pull request comment",
        )
        .await?;
        Ok(())
    }
}
