use crate::adapters::outbound::filesystem::extract_tar_gz;
use crate::shared::error::GateError;
use crate::shared::Result;
use std::path::Path;
use std::time::Duration;

const TIMEOUT_SECONDS: u64 = 60;

/// Builds the HTTP client shared by the VCS adapters
pub(super) fn build_http_client() -> Result<reqwest::Client> {
    let version = env!("CARGO_PKG_VERSION");
    let user_agent = format!("pr-vuln-gate/{}", version);
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECONDS))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Normalises an API endpoint: falls back to `default` when empty and drops
/// trailing slashes.
pub(super) fn normalize_endpoint(endpoint: &str, default: &str) -> String {
    let endpoint = endpoint.trim();
    let endpoint = if endpoint.is_empty() { default } else { endpoint };
    endpoint.trim_end_matches('/').to_string()
}

/// Validates an owner or repository name before it is put into a URL path
pub(super) fn validate_path_segment(segment: &str, segment_type: &str) -> Result<()> {
    if segment.is_empty() {
        anyhow::bail!("{} must not be empty", segment_type);
    }

    // Security: Prevent URL injection attacks
    if segment.contains('/') || segment.contains('\\') || segment.contains("..") {
        anyhow::bail!(
            "Security: {} contains path separators which are not allowed",
            segment_type
        );
    }

    if segment.contains('#') || segment.contains('?') || segment.contains('@') {
        anyhow::bail!("Security: {} contains URL-unsafe characters", segment_type);
    }

    Ok(())
}

/// Maps a non-success HTTP status to `GateError::Vcs`
pub(super) async fn ensure_success(
    response: reqwest::Response,
    operation: &str,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(GateError::Vcs {
        operation: operation.to_string(),
        details: format!("status code {}: {}", status, body.trim()),
    }
    .into())
}

/// Wraps transport errors (DNS, TLS, timeouts) as `GateError::Vcs`
pub(super) fn transport_error(operation: &str, error: reqwest::Error) -> anyhow::Error {
    GateError::Vcs {
        operation: operation.to_string(),
        details: error.to_string(),
    }
    .into()
}

/// Extracts a downloaded archive off the async runtime
pub(super) async fn extract_archive(bytes: Vec<u8>, local_path: &Path) -> Result<()> {
    let local_path = local_path.to_path_buf();
    tokio::task::spawn_blocking(move || extract_tar_gz(&bytes, &local_path)).await?
}
