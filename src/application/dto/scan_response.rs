use crate::security_gate::domain::IssueRow;

/// What happened to the pull request comment of a scan pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    Created,
    Updated,
    /// An identical comment already exists
    Unchanged,
    /// Dry run: nothing was published
    Skipped,
}

/// New issues of one working directory of one project
#[derive(Debug, Clone)]
pub struct DirectoryReport {
    pub project_index: usize,
    pub working_dir: String,
    /// New issues, in display order
    pub rows: Vec<IssueRow>,
}

/// ScanPullRequestResponse - Response DTO of the pull request scan use case
///
/// One scan pass renders and publishes a single comment covering every
/// working directory.
#[derive(Debug, Clone)]
pub struct ScanPullRequestResponse {
    pub reports: Vec<DirectoryReport>,
    /// All new issues of the pass, in display order
    pub rows: Vec<IssueRow>,
    /// Full comment body, marker line included
    pub body: String,
    pub comment: CommentAction,
}

impl ScanPullRequestResponse {
    pub fn new_issue_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_new_issues(&self) -> bool {
        !self.rows.is_empty()
    }
}
