use crate::security_gate::domain::ScanParams;

/// ScanParamsBuilder service for building scan request parameters
///
/// Pure function of the configured watches and project key; it never fails.
pub struct ScanParamsBuilder;

impl ScanParamsBuilder {
    /// Builds scan parameters from a project's policy configuration
    ///
    /// Watches take precedence over a project key. Without either, raw
    /// vulnerabilities are requested since no policy can produce violations.
    /// Licenses are never requested here.
    ///
    /// # Arguments
    /// * `watches` - Watch names (duplicates are dropped, first occurrence wins)
    /// * `project_key` - Project key, empty when not configured
    pub fn build(watches: &[String], project_key: &str) -> ScanParams {
        let mut params = ScanParams::default();

        if !watches.is_empty() {
            let mut unique: Vec<String> = Vec::with_capacity(watches.len());
            for watch in watches {
                if !unique.contains(watch) {
                    unique.push(watch.clone());
                }
            }
            params.watches = unique;
        } else if !project_key.is_empty() {
            params.project_key = project_key.to_string();
        } else {
            params.include_vulnerabilities = true;
        }

        params
    }
}
