mod adapters;
mod application;
mod cli;
mod config;
mod ports;
mod security_gate;
mod shared;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::process::{CommandScanner, TokioCommandRunner};
use application::dto::{ScanPullRequestRequest, VcsParams, VerifyEnvironmentRequest};
use application::factories::{FormatterFactory, PresenterFactory, VcsClientFactory};
use application::use_cases::{ScanPullRequestUseCase, VerifyEnvironmentUseCase};
use cli::{Args, Command, ScanPullRequestArgs, VerifyEnvironmentArgs};
use config::ConfigFile;
use ports::outbound::ProgressReporter;
use shared::error::{ExitCode, GateError};
use shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_logging(args.verbose);

    let exit_code = match run(args).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            let exit_code = ExitCode::from_error(&e);
            if exit_code == ExitCode::SecurityIssuesFound {
                eprintln!("\n🚨 {}\n", e);
            } else {
                eprintln!("\n❌ An error occurred:\n");
                eprintln!("{}", e);

                // Display error chain
                for cause in e.chain().skip(1) {
                    eprintln!("\nCaused by: {}", cause);
                }
                eprintln!();
            }
            exit_code
        }
    };

    process::exit(exit_code.as_i32());
}

/// Diagnostics go to stderr; `RUST_LOG` wins unless `--verbose` is given
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,pr_vuln_gate=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<()> {
    validate_repo_root(&args.repo_root)?;
    let config = load_config(args.config.as_deref(), &args.repo_root)?;

    let task = async {
        match &args.command {
            Command::ScanPullRequest(scan) => scan_pull_request(&args, scan, &config).await,
            Command::VerifyEnvironment(verify) => verify_environment(verify, &config).await,
        }
    };

    match args.timeout_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), task)
            .await
            .map_err(|_| anyhow::anyhow!("Timed out after {} seconds", secs))?,
        None => task.await,
    }
}

fn load_config(explicit: Option<&Path>, repo_root: &Path) -> Result<ConfigFile> {
    match explicit {
        Some(path) => config::load_config_from_path(path),
        None => Ok(config::discover_config(repo_root)?.unwrap_or_default()),
    }
}

async fn scan_pull_request(args: &Args, scan: &ScanPullRequestArgs, config: &ConfigFile) -> Result<()> {
    let scanner_config = config.scanner();

    // Create adapters (Dependency Injection)
    let scanner = CommandScanner::new(
        scanner_config.command,
        scanner_config.args,
        TokioCommandRunner::new(),
    );
    let vcs_client = VcsClientFactory::create(
        scan.vcs.git_provider,
        &scan.vcs.git_api_endpoint,
        &scan.vcs.git_token,
    )?;
    let formatter = FormatterFactory::create(config.output_style()?);

    let mut use_case = ScanPullRequestUseCase::new(
        scanner,
        vcs_client,
        TokioCommandRunner::new(),
        formatter,
        StderrProgressReporter::new(),
    );
    if let Some(presenter_type) = PresenterFactory::for_run(args.output.clone(), args.dry_run) {
        use_case = use_case.with_presenter(PresenterFactory::create(presenter_type));
    }

    let request = ScanPullRequestRequest {
        repo_root: args.repo_root.clone(),
        projects: config.projects(),
        vcs: VcsParams {
            provider: scan.vcs.git_provider,
            api_endpoint: scan.vcs.git_api_endpoint.clone(),
            token: scan.vcs.git_token.clone(),
            owner: scan.vcs.git_owner.clone(),
            repository: scan.vcs.git_repo.clone(),
            pull_request_id: scan.pull_request_id,
            target_branch: scan.target_branch.clone(),
        },
        fail_on_security_issues: scan.fail_on_security_issues || config.fail_on_security_issues(),
        dry_run: args.dry_run,
    };

    let response = use_case.execute(request).await?;
    tracing::info!(
        reports = response.reports.len(),
        new_issues = response.new_issue_count(),
        comment = ?response.comment,
        "Pull request scan finished"
    );
    Ok(())
}

async fn verify_environment(verify: &VerifyEnvironmentArgs, config: &ConfigFile) -> Result<()> {
    let request = VerifyEnvironmentRequest {
        running_in_github_actions: verify.github_actions,
        provider: verify.vcs.git_provider,
        api_endpoint: verify.vcs.git_api_endpoint.clone(),
        owner: verify.vcs.git_owner.clone(),
        repository: verify.vcs.git_repo.clone(),
        environment: verify
            .environment
            .clone()
            .unwrap_or_else(|| config.environment().to_string()),
    };

    let progress_reporter = StderrProgressReporter::new();
    let vcs_client = VcsClientFactory::create(
        verify.vcs.git_provider,
        &verify.vcs.git_api_endpoint,
        &verify.vcs.git_token,
    )?;

    let use_case = VerifyEnvironmentUseCase::new(vcs_client);
    if !VerifyEnvironmentUseCase::<Box<dyn ports::outbound::VcsClient>>::applies_to(&request) {
        progress_reporter.report("ℹ️  Environment verification applies to GitHub Actions on github.com only, skipping");
        return Ok(());
    }

    progress_reporter.start_step(&format!("🔐 Verifying environment '{}'", request.environment));
    use_case.execute(&request).await?;
    progress_reporter.report_completion(&format!("✅ Environment '{}' is protected", request.environment));
    Ok(())
}

fn validate_repo_root(path: &Path) -> Result<()> {
    let invalid = |reason: &str| -> anyhow::Error {
        GateError::configuration(format!(
            "repository root '{}': {}",
            path.display(),
            reason
        ))
        .into()
    };

    if !path.exists() {
        return Err(invalid("Directory does not exist"));
    }

    // Security check: Reject symbolic links for the checkout root
    let metadata = std::fs::symlink_metadata(path)
        .map_err(|e| invalid(&format!("Failed to read path metadata: {}", e)))?;
    if metadata.is_symlink() {
        return Err(invalid(
            "Security: Repository root is a symbolic link. For security reasons, symbolic links are not allowed.",
        ));
    }

    if !path.is_dir() {
        return Err(invalid("Not a directory"));
    }

    let canonical_path: PathBuf = path
        .canonicalize()
        .map_err(|e| invalid(&format!("Failed to canonicalize path: {}", e)))?;
    if !canonical_path.is_dir() {
        return Err(invalid("Resolved path is not a directory"));
    }

    Ok(())
}
