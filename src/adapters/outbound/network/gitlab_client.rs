use super::http::{
    build_http_client, ensure_success, extract_archive, normalize_endpoint, transport_error,
    validate_path_segment,
};
use crate::ports::outbound::{CommentInfo, RepositoryEnvironmentInfo, RepositoryInfo, VcsClient};
use crate::shared::error::GateError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Public GitLab REST API endpoint
pub const GITLAB_API_ENDPOINT: &str = "https://gitlab.com/api/v4";

const NOTES_PER_PAGE: usize = 100;

#[derive(Debug, Deserialize)]
struct GitLabProject {
    #[serde(default)]
    default_branch: Option<String>,
    #[serde(default)]
    visibility: String,
}

#[derive(Debug, Deserialize)]
struct GitLabNote {
    id: u64,
    #[serde(default)]
    body: String,
}

#[derive(Debug, Serialize)]
struct GitLabNoteBody<'a> {
    body: &'a str,
}

/// GitLabClient adapter implementing the VcsClient port over the v4 REST API
///
/// Pull requests are merge requests and comments are merge request notes.
/// GitLab has no deployment environment reviewers, so environment lookups
/// always fail.
pub struct GitLabClient {
    client: reqwest::Client,
    api_endpoint: String,
    token: String,
}

impl GitLabClient {
    /// Creates a client; an empty endpoint means gitlab.com
    pub fn new(api_endpoint: &str, token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            api_endpoint: normalize_endpoint(api_endpoint, GITLAB_API_ENDPOINT),
            token: token.into(),
        })
    }

    /// Project URL; GitLab addresses projects by URL-encoded `owner/repo`
    fn project_url(&self, owner: &str, repository: &str) -> Result<String> {
        validate_path_segment(owner, "Owner")?;
        validate_path_segment(repository, "Repository")?;
        let project_id = format!("{}/{}", owner, repository);
        Ok(format!(
            "{}/projects/{}",
            self.api_endpoint,
            urlencoding::encode(&project_id)
        ))
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, url);
        if self.token.is_empty() {
            builder
        } else {
            builder.header("PRIVATE-TOKEN", &self.token)
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
impl VcsClient for GitLabClient {
    async fn get_repository_info(&self, owner: &str, repository: &str) -> Result<RepositoryInfo> {
        let url = self.project_url(owner, repository)?;
        let response = self
            .send(self.request(reqwest::Method::GET, &url), "get repository info")
            .await?;
        let project: GitLabProject = response.json().await?;

        Ok(RepositoryInfo {
            default_branch: project.default_branch.unwrap_or_default(),
            private: project.visibility != "public",
        })
    }

    async fn get_repository_environment_info(
        &self,
        _owner: &str,
        _repository: &str,
        environment: &str,
    ) -> Result<RepositoryEnvironmentInfo> {
        Err(GateError::Vcs {
            operation: "get repository environment".to_string(),
            details: format!(
                "GitLab does not support environment reviewers (requested '{}')",
                environment
            ),
        }
        .into())
    }

    async fn download_repository(
        &self,
        owner: &str,
        repository: &str,
        branch: &str,
        local_path: &Path,
    ) -> Result<()> {
        let url = format!(
            "{}/repository/archive.tar.gz?sha={}",
            self.project_url(owner, repository)?,
            urlencoding::encode(branch)
        );
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
            "{}/merge_requests/{}/notes",
            self.project_url(owner, repository)?,
            pull_request_id
        );

        let mut comments = Vec::new();
        let mut page = 1;
        loop {
            let url = format!("{}?per_page={}&page={}", base, NOTES_PER_PAGE, page);
            let response = self
                .send(
                    self.request(reqwest::Method::GET, &url),
                    "list pull request comments",
                )
                .await?;
            let batch: Vec<GitLabNote> = response.json().await?;
            let batch_len = batch.len();
            comments.extend(batch.into_iter().map(|note| CommentInfo {
                id: note.id,
                content: note.body,
            }));
            if batch_len < NOTES_PER_PAGE {
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
            "{}/merge_requests/{}/notes",
            self.project_url(owner, repository)?,
            pull_request_id
        );
        self.send(
            self.request(reqwest::Method::POST, &url)
                .json(&GitLabNoteBody { body: content }),
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
        pull_request_id: u64,
    ) -> Result<()> {
        let url = format!(
            "{}/merge_requests/{}/notes/{}",
            self.project_url(owner, repository)?,
            pull_request_id,
            comment_id
        );
        self.send(
            self.request(reqwest::Method::PUT, &url)
                .json(&GitLabNoteBody { body: content }),
            "edit pull request comment",
        )
        .await?;
        Ok(())
    }
}
