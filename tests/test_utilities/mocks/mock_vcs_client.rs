use async_trait::async_trait;
use pr_vuln_gate::prelude::*;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Mock VcsClient keeping pull request comments in memory
///
/// Added comments get increasing ids and show up in later listings, so a
/// second run against the same mock sees what the first one published.
#[derive(Clone, Default)]
pub struct MockVcsClient {
    pub baseline_dirs: Vec<String>,
    pub environment: Option<RepositoryEnvironmentInfo>,
    pub comments: Arc<Mutex<Vec<CommentInfo>>>,
    pub edits: Arc<Mutex<Vec<u64>>>,
    pub requests: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockVcsClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directories the downloaded target branch contains
    pub fn with_baseline_dirs(mut self, dirs: &[&str]) -> Self {
        self.baseline_dirs = dirs.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn with_environment(mut self, name: &str, reviewers: &[&str]) -> Self {
        self.environment = Some(RepositoryEnvironmentInfo {
            name: name.to_string(),
            reviewers: reviewers.iter().map(|r| r.to_string()).collect(),
        });
        self
    }

    pub fn get_comments(&self) -> Vec<CommentInfo> {
        self.comments.lock().unwrap().clone()
    }

    pub fn edit_count(&self) -> usize {
        self.edits.lock().unwrap().len()
    }

    pub fn get_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: &str) {
        self.requests.lock().unwrap().push(request.to_string());
    }
}

#[async_trait]
impl VcsClient for MockVcsClient {
    async fn get_repository_info(&self, _owner: &str, _repository: &str) -> Result<RepositoryInfo> {
        self.record("get_repository_info");
        Ok(RepositoryInfo {
            default_branch: "main".to_string(),
            private: false,
        })
    }

    async fn get_repository_environment_info(
        &self,
        _owner: &str,
        _repository: &str,
        environment: &str,
    ) -> Result<RepositoryEnvironmentInfo> {
        self.record("get_repository_environment_info");
        match &self.environment {
            Some(info) if info.name == environment => Ok(info.clone()),
            _ => anyhow::bail!("status code 404: environment '{}' not found", environment),
        }
    }

    async fn download_repository(
        &self,
        _owner: &str,
        _repository: &str,
        _branch: &str,
        local_path: &Path,
    ) -> Result<()> {
        self.record("download_repository");
        for dir in &self.baseline_dirs {
            std::fs::create_dir_all(local_path.join(dir))?;
        }
        Ok(())
    }

    async fn list_pull_request_comments(
        &self,
        _owner: &str,
        _repository: &str,
        _pull_request_id: u64,
    ) -> Result<Vec<CommentInfo>> {
        self.record("list_pull_request_comments");
        Ok(self.get_comments())
    }

    async fn add_pull_request_comment(
        &self,
        _owner: &str,
        _repository: &str,
        content: &str,
        _pull_request_id: u64,
    ) -> Result<()> {
        self.record("add_pull_request_comment");
        let mut comments = self.comments.lock().unwrap();
        let id = comments.len() as u64 + 1;
        comments.push(CommentInfo {
            id,
            content: content.to_string(),
        });
        Ok(())
    }

    async fn edit_pull_request_comment(
        &self,
        _owner: &str,
        _repository: &str,
        comment_id: u64,
        content: &str,
        _pull_request_id: u64,
    ) -> Result<()> {
        self.record("edit_pull_request_comment");
        let mut comments = self.comments.lock().unwrap();
        let comment = comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| anyhow::anyhow!("comment {} not found", comment_id))?;
        comment.content = content.to_string();
        self.edits.lock().unwrap().push(comment_id);
        Ok(())
    }
}
