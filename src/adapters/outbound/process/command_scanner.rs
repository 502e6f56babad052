use crate::ports::outbound::{CommandRunner, Scanner};
use crate::security_gate::domain::{
    Component, ComponentMap, Cve, ImpactPathNode, ScanParams, ScanResult, Violation,
    Vulnerability,
};
use crate::shared::error::GateError;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::path::Path;

/// CommandScanner adapter running an Xray-compatible audit CLI
///
/// The configured command is invoked in the scanned directory with the scan
/// parameters appended as flags (`--watches=a,b`, `--project=KEY`, `--vuln`,
/// `--licenses`). Its stdout must be a JSON scan response, or an array of
/// them, with `violations` and `vulnerabilities` lists.
pub struct CommandScanner<R: CommandRunner> {
    command: String,
    args: Vec<String>,
    runner: R,
}

impl<R: CommandRunner> CommandScanner<R> {
    pub fn new(command: impl Into<String>, args: Vec<String>, runner: R) -> Self {
        Self {
            command: command.into(),
            args,
            runner,
        }
    }

    /// Full argument list for one scan: configured args, then parameter flags.
    fn build_args(&self, params: &ScanParams) -> Vec<String> {
        let mut args = self.args.clone();
        if !params.watches.is_empty() {
            args.push(format!("--watches={}", params.watches.join(",")));
        }
        if !params.project_key.is_empty() {
            args.push(format!("--project={}", params.project_key));
        }
        if params.include_vulnerabilities {
            args.push("--vuln".to_string());
        }
        if params.include_licenses {
            args.push("--licenses".to_string());
        }
        args
    }
}

#[async_trait]
impl<R: CommandRunner> Scanner for CommandScanner<R> {
    async fn scan(&self, params: &ScanParams, target_dir: &Path) -> Result<ScanResult> {
        let args = self.build_args(params);
        tracing::debug!(
            mode = %params.mode(),
            dir = %target_dir.display(),
            "Starting security scan"
        );

        let output = self
            .runner
            .run(&self.command, &args, target_dir)
            .await
            .map_err(|e| GateError::Scan {
                working_dir: target_dir.to_path_buf(),
                details: format!("{:#}", e),
            })?;

        if !output.success() {
            return Err(GateError::Scan {
                working_dir: target_dir.to_path_buf(),
                details: format!(
                    "'{}' exited with status {:?}: {}",
                    self.command,
                    output.status_code,
                    output.stderr.trim()
                ),
            }
            .into());
        }

        parse_scan_output(&output.stdout)
            .with_context(|| format!("Failed to parse scan output for {}", target_dir.display()))
    }
}

/// Parses scanner JSON output into a single [`ScanResult`]
///
/// Several responses (one per technology) are concatenated in order.
pub fn parse_scan_output(stdout: &str) -> Result<ScanResult> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(ScanResult::default());
    }

    let responses = match serde_json::from_str::<ScanOutput>(trimmed)? {
        ScanOutput::Many(responses) => responses,
        ScanOutput::One(response) => vec![response],
    };

    let mut result = ScanResult::default();
    for response in responses {
        result
            .violations
            .extend(response.violations.into_iter().map(Violation::from));
        result
            .vulnerabilities
            .extend(response.vulnerabilities.into_iter().map(Vulnerability::from));
    }
    Ok(result)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScanOutput {
    Many(Vec<ScanResponse>),
    One(ScanResponse),
}

#[derive(Debug, Deserialize)]
struct ScanResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    violations: Vec<WireViolation>,
    #[serde(default, deserialize_with = "null_as_default")]
    vulnerabilities: Vec<WireVulnerability>,
}

#[derive(Debug, Deserialize)]
struct WireViolation {
    #[serde(default, deserialize_with = "null_as_default")]
    issue_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    severity: String,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    violation_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    cves: Vec<WireCve>,
    #[serde(default, deserialize_with = "null_as_default")]
    components: BTreeMap<String, WireComponent>,
}

#[derive(Debug, Deserialize)]
struct WireVulnerability {
    #[serde(default, deserialize_with = "null_as_default")]
    issue_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    severity: String,
    #[serde(default, deserialize_with = "null_as_default")]
    cves: Vec<WireCve>,
    #[serde(default, deserialize_with = "null_as_default")]
    components: BTreeMap<String, WireComponent>,
}

#[derive(Debug, Deserialize)]
struct WireCve {
    #[serde(default, alias = "id", deserialize_with = "null_as_default")]
    cve: String,
}

#[derive(Debug, Deserialize)]
struct WireComponent {
    #[serde(default, deserialize_with = "null_as_default")]
    fixed_versions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    impact_paths: Vec<Vec<WireImpactPathNode>>,
}

#[derive(Debug, Deserialize)]
struct WireImpactPathNode {
    #[serde(default, deserialize_with = "null_as_default")]
    component_id: String,
}

/// Reads an explicit `null` the same way as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn convert_cves(cves: Vec<WireCve>) -> Vec<Cve> {
    cves.into_iter().map(|c| Cve { id: c.cve }).collect()
}

fn convert_components(components: BTreeMap<String, WireComponent>) -> ComponentMap {
    components
        .into_iter()
        .map(|(id, component)| {
            let impact_paths = component
                .impact_paths
                .into_iter()
                .map(|path| {
                    path.into_iter()
                        .map(|node| ImpactPathNode::new(node.component_id))
                        .collect()
                })
                .collect();
            (
                id,
                Component {
                    fixed_versions: component.fixed_versions,
                    impact_paths,
                },
            )
        })
        .collect()
}

impl From<WireViolation> for Violation {
    fn from(wire: WireViolation) -> Self {
        Violation {
            issue_id: wire.issue_id,
            summary: wire.summary,
            severity: wire.severity,
            violation_type: wire.violation_type,
            cves: convert_cves(wire.cves),
            components: convert_components(wire.components),
        }
    }
}

impl From<WireVulnerability> for Vulnerability {
    fn from(wire: WireVulnerability) -> Self {
        Vulnerability {
            issue_id: wire.issue_id,
            summary: wire.summary,
            severity: wire.severity,
            cves: convert_cves(wire.cves),
            components: convert_components(wire.components),
        }
    }
}
