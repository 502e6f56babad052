use crate::application::dto::{
    CommentAction, DirectoryReport, Project, ScanPullRequestRequest, ScanPullRequestResponse,
    VcsParams,
};
use crate::application::use_cases::InstallDependenciesUseCase;
use crate::ports::outbound::{
    CommandRunner, OutputPresenter, ProgressReporter, ReportFormatter, Scanner, VcsClient,
};
use crate::security_gate::domain::{sort_for_display, IssueRow, ScanParams, ScanResult};
use crate::security_gate::services::{DeltaEngine, ScanParamsBuilder};
use crate::shared::error::GateError;
use crate::shared::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A working directory as configured and as resolved against a tree root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDir {
    pub name: String,
    pub path: PathBuf,
}

/// Resolves a project's working directories against `root`
///
/// `.` is the root itself; an empty list means `["."]`.
pub fn resolve_working_dirs(project: &Project, root: &Path) -> Vec<WorkingDir> {
    project
        .effective_working_dirs()
        .into_iter()
        .map(|name| {
            let path = if name == "." {
                root.to_path_buf()
            } else {
                root.join(&name)
            };
            WorkingDir { name, path }
        })
        .collect()
}

/// First line of the comment this tool publishes on a pull request
///
/// The marker lets a rerun find and update its own earlier comment.
pub const COMMENT_MARKER: &str = "<!-- pr-vuln-gate report -->";

/// ScanPullRequestUseCase - Core use case of the pull request security gate
///
/// For every project and working directory: install, scan the baseline and
/// the head tree and keep only new issues. Directories are processed one
/// after another and independently. Once all are done, the first
/// infrastructure failure decides the outcome; otherwise the new issues of
/// every directory are rendered into one comment and published once.
///
/// # Type Parameters
/// * `S` - Scanner implementation
/// * `V` - VcsClient implementation
/// * `C` - CommandRunner implementation
/// * `F` - ReportFormatter implementation
/// * `PR` - ProgressReporter implementation
pub struct ScanPullRequestUseCase<S, V, C, F, PR> {
    scanner: S,
    vcs_client: V,
    installer: InstallDependenciesUseCase<C>,
    formatter: F,
    progress_reporter: PR,
    presenter: Option<Box<dyn OutputPresenter>>,
}

impl<S, V, C, F, PR> ScanPullRequestUseCase<S, V, C, F, PR>
where
    S: Scanner,
    V: VcsClient,
    C: CommandRunner,
    F: ReportFormatter,
    PR: ProgressReporter,
{
    /// Creates a new ScanPullRequestUseCase with injected dependencies
    pub fn new(scanner: S, vcs_client: V, command_runner: C, formatter: F, progress_reporter: PR) -> Self {
        Self {
            scanner,
            vcs_client,
            installer: InstallDependenciesUseCase::new(command_runner),
            formatter,
            progress_reporter,
            presenter: None,
        }
    }

    /// Also presents the rendered report locally (stdout or file)
    pub fn with_presenter(mut self, presenter: Box<dyn OutputPresenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    /// Executes the pull request scan
    ///
    /// # Returns
    /// One report per (project, working directory) and the single
    /// rendered comment
    ///
    /// # Errors
    /// - The first infrastructure failure (install, scan, VCS, malformed
    ///   scan output), with its working directory as context. Nothing is
    ///   presented or published in that case.
    /// - `GateError::SecurityIssuesFound` if new issues were found and
    ///   `fail_on_security_issues` is set
    pub async fn execute(&self, request: ScanPullRequestRequest) -> Result<ScanPullRequestResponse> {
        let baseline_tree = self.download_baseline(&request.vcs).await?;
        let baseline_root = baseline_tree.as_ref().map(|dir| dir.path());

        let mut reports: Vec<DirectoryReport> = Vec::new();
        let mut failures: Vec<anyhow::Error> = Vec::new();

        for (project_index, project) in request.projects.iter().enumerate() {
            let params = ScanParamsBuilder::build(&project.watches, &project.project_key);
            tracing::debug!(
                project_index,
                mode = %params.mode(),
                watches = ?params.watches,
                project_key = %params.project_key,
                "Built scan parameters"
            );

            for working_dir in resolve_working_dirs(project, &request.repo_root) {
                let baseline_dir = baseline_root.map(|root| root.join(&working_dir.name));
                match self
                    .process_directory(
                        &request,
                        project,
                        &params,
                        &working_dir,
                        baseline_dir.as_deref(),
                    )
                    .await
                {
                    Ok(rows) => reports.push(DirectoryReport {
                        project_index,
                        working_dir: working_dir.name.clone(),
                        rows,
                    }),
                    Err(e) => {
                        self.progress_reporter.report_error(&format!(
                            "❌ Scanning '{}' failed: {:#}",
                            working_dir.name, e
                        ));
                        failures.push(e.context(format!(
                            "Failed to scan working directory '{}'",
                            working_dir.name
                        )));
                    }
                }
            }
        }

        if let Some(first) = failures.into_iter().next() {
            return Err(first);
        }

        let mut rows: Vec<IssueRow> = reports.iter().flat_map(|r| r.rows.iter().cloned()).collect();
        sort_for_display(&mut rows);
        let body = format!("{}\n{}", COMMENT_MARKER, self.formatter.format(&rows));

        if let Some(presenter) = &self.presenter {
            presenter.present(&body)?;
        }

        let comment = if request.dry_run {
            CommentAction::Skipped
        } else {
            self.publish(&request.vcs, &body).await?
        };

        let response = ScanPullRequestResponse {
            reports,
            rows,
            body,
            comment,
        };
        let new_issues = response.new_issue_count();
        if new_issues > 0 && request.fail_on_security_issues {
            self.progress_reporter
                .report_error(&format!("🚨 {} new security issue(s) found", new_issues));
            return Err(GateError::SecurityIssuesFound.into());
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Pull request scan complete: {} new security issue(s)",
            new_issues
        ));
        Ok(response)
    }

    /// Downloads the target branch, or `None` when there is no baseline
    async fn download_baseline(&self, vcs: &VcsParams) -> Result<Option<TempDir>> {
        let Some(branch) = vcs.target_branch.as_deref().filter(|b| !b.is_empty()) else {
            self.progress_reporter
                .report("ℹ️  No target branch configured, reporting all issues");
            return Ok(None);
        };

        self.progress_reporter
            .start_step(&format!("📥 Downloading target branch '{}'", branch));
        let temp_dir = TempDir::new().context("Failed to create a temporary directory")?;
        self.vcs_client
            .download_repository(&vcs.owner, &vcs.repository, branch, temp_dir.path())
            .await
            .with_context(|| format!("Failed to download target branch '{}'", branch))?;
        self.progress_reporter
            .report(&format!("📥 Downloaded target branch '{}'", branch));

        Ok(Some(temp_dir))
    }

    async fn process_directory(
        &self,
        request: &ScanPullRequestRequest,
        project: &Project,
        params: &ScanParams,
        working_dir: &WorkingDir,
        baseline_dir: Option<&Path>,
    ) -> Result<Vec<IssueRow>> {
        if !working_dir.path.is_dir() {
            return Err(GateError::configuration(format!(
                "working directory '{}' does not exist in {}",
                working_dir.name,
                request.repo_root.display()
            ))
            .into());
        }

        let baseline_dir = baseline_dir.filter(|dir| dir.is_dir());
        if baseline_dir.is_none() {
            tracing::info!(dir = %working_dir.name, "No baseline tree, reporting all issues");
        }

        self.progress_reporter
            .start_step(&format!("🔍 Scanning '{}'", working_dir.name));

        let baseline = async {
            match baseline_dir {
                Some(dir) => {
                    self.installer.install(project, dir, false).await?;
                    self.scanner.scan(params, dir).await.map(Some)
                }
                None => Ok(None),
            }
        };
        let head = async {
            self.installer
                .install(project, &working_dir.path, true)
                .await?;
            self.scanner.scan(params, &working_dir.path).await
        };
        let (baseline, head): (Option<ScanResult>, ScanResult) = futures::try_join!(baseline, head)?;

        let mut rows = self.diff(baseline, head, params)?;
        sort_for_display(&mut rows);

        self.progress_reporter.report(&format!(
            "🔍 '{}': {} new issue(s)",
            working_dir.name,
            rows.len()
        ));

        Ok(rows)
    }

    fn diff(&self, baseline: Option<ScanResult>, head: ScanResult, params: &ScanParams) -> Result<Vec<IssueRow>> {
        let mode = params.mode();
        let rows = match baseline {
            Some(baseline) => {
                DeltaEngine::new_issues(&[baseline], &[head], mode, params.include_licenses)?
            }
            None => DeltaEngine::all_issues(&[head], mode, params.include_licenses)?,
        };
        Ok(rows)
    }

    /// Creates the comment, or updates the earlier one carrying the marker
    async fn publish(&self, vcs: &VcsParams, body: &str) -> Result<CommentAction> {
        let comments = self
            .vcs_client
            .list_pull_request_comments(&vcs.owner, &vcs.repository, vcs.pull_request_id)
            .await?;

        let existing = comments
            .iter()
            .find(|comment| comment.content.lines().next().map(str::trim) == Some(COMMENT_MARKER));

        match existing {
            Some(comment) if comment.content.trim_end() == body.trim_end() => {
                tracing::info!(comment_id = comment.id, "Comment is up to date");
                Ok(CommentAction::Unchanged)
            }
            Some(comment) => {
                self.vcs_client
                    .edit_pull_request_comment(
                        &vcs.owner,
                        &vcs.repository,
                        comment.id,
                        body,
                        vcs.pull_request_id,
                    )
                    .await?;
                tracing::info!(comment_id = comment.id, "Comment updated");
                Ok(CommentAction::Updated)
            }
            None => {
                self.vcs_client
                    .add_pull_request_comment(&vcs.owner, &vcs.repository, body, vcs.pull_request_id)
                    .await?;
                tracing::info!(pull_request_id = vcs.pull_request_id, "Comment created");
                Ok(CommentAction::Created)
            }
        }
    }
}
