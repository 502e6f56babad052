use crate::security_gate::domain::{ScanParams, ScanResult};
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// Scanner port for running a dependency security scan
///
/// The scanning engine is a black box: it receives the scan parameters and
/// the directory to scan and hands back raw findings.
#[async_trait]
pub trait Scanner: Send + Sync {
    /// Scans the project rooted at `target_dir`
    ///
    /// # Arguments
    /// * `params` - Watches / project key and inclusion flags for this scan
    /// * `target_dir` - Directory whose dependencies are audited
    ///
    /// # Errors
    /// Returns an error if the scanner cannot be started, exits with a
    /// failure, or produces output that cannot be parsed
    async fn scan(&self, params: &ScanParams, target_dir: &Path) -> Result<ScanResult>;
}
