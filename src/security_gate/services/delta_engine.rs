use crate::security_gate::domain::{
    split_component_id, Component, ComponentMap, ComponentRow, Cve, CveRow, IssueKey, IssueRow,
    ScanMode, ScanResult,
};
use std::collections::HashSet;
use thiserror::Error;

/// Raised when a scanner response cannot be expanded into rows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeltaError {
    #[error("Malformed finding '{issue_id}' in scan results: {reason}")]
    MalformedFinding { issue_id: String, reason: String },
}

/// Borrowed view over the fields violations and vulnerabilities share.
struct Finding<'a> {
    issue_id: &'a str,
    severity: &'a str,
    cves: &'a [Cve],
    components: &'a ComponentMap,
}

/// DeltaEngine service computing newly introduced issues
///
/// This service contains pure business logic: it reads scan results and
/// never mutates them. Identity of an issue is `(issue id, impacted
/// dependency name)`, so each impacted component is tracked on its own.
pub struct DeltaEngine;

impl DeltaEngine {
    /// Returns head rows whose identity does not appear in the baseline
    ///
    /// The baseline identity set is built from both violations and
    /// vulnerabilities regardless of `mode`; only head rows are filtered by
    /// mode.
    ///
    /// # Errors
    /// Returns `DeltaError::MalformedFinding` for a finding with an empty issue
    /// id or an empty component identifier, in either input.
    pub fn new_issues(
        baseline: &[ScanResult],
        head: &[ScanResult],
        mode: ScanMode,
        include_licenses: bool,
    ) -> Result<Vec<IssueRow>, DeltaError> {
        let known = Self::identity_keys(baseline)?;

        let rows = Self::all_issues(head, mode, include_licenses)?
            .into_iter()
            .filter(|row| !known.contains(&row.key()))
            .collect();

        Ok(rows)
    }

    /// Returns every row of `current` for the given mode, unfiltered
    ///
    /// Used when no baseline exists. An empty input yields an empty output.
    pub fn all_issues(
        current: &[ScanResult],
        mode: ScanMode,
        include_licenses: bool,
    ) -> Result<Vec<IssueRow>, DeltaError> {
        let mut rows = Vec::new();
        for finding in Self::findings(current, mode, include_licenses) {
            rows.extend(Self::expand(&finding)?);
        }
        Ok(rows)
    }

    fn findings(
        results: &[ScanResult],
        mode: ScanMode,
        include_licenses: bool,
    ) -> Vec<Finding<'_>> {
        match mode {
            ScanMode::Violations => results
                .iter()
                .flat_map(|result| result.violations.iter())
                .filter(|violation| include_licenses || !violation.is_license_violation())
                .map(|violation| Finding {
                    issue_id: &violation.issue_id,
                    severity: &violation.severity,
                    cves: &violation.cves,
                    components: &violation.components,
                })
                .collect(),
            ScanMode::Vulnerabilities => results
                .iter()
                .flat_map(|result| result.vulnerabilities.iter())
                .map(|vulnerability| Finding {
                    issue_id: &vulnerability.issue_id,
                    severity: &vulnerability.severity,
                    cves: &vulnerability.cves,
                    components: &vulnerability.components,
                })
                .collect(),
        }
    }

    fn identity_keys(results: &[ScanResult]) -> Result<HashSet<IssueKey>, DeltaError> {
        let mut keys = HashSet::new();
        let all_findings = Self::findings(results, ScanMode::Violations, true)
            .into_iter()
            .chain(Self::findings(results, ScanMode::Vulnerabilities, true));

        for finding in all_findings {
            Self::validate_issue_id(&finding)?;
            for component_id in finding.components.keys() {
                Self::validate_component_id(&finding, component_id)?;
                let (name, _) = split_component_id(component_id);
                keys.insert(IssueKey::new(finding.issue_id, &name));
            }
        }
        Ok(keys)
    }

    /// Expands one finding into one row per impacted component.
    fn expand(finding: &Finding<'_>) -> Result<Vec<IssueRow>, DeltaError> {
        Self::validate_issue_id(finding)?;

        if finding.components.is_empty() {
            tracing::warn!(
                issue_id = finding.issue_id,
                "Finding has no impacted components and is left out of the report"
            );
            return Ok(Vec::new());
        }

        let cves: Vec<CveRow> = finding
            .cves
            .iter()
            .filter(|cve| !cve.id.is_empty())
            .map(|cve| CveRow { id: cve.id.clone() })
            .collect();

        let mut rows = Vec::with_capacity(finding.components.len());
        for (component_id, component) in finding.components {
            Self::validate_component_id(finding, component_id)?;
            let (name, version) = split_component_id(component_id);
            rows.push(IssueRow {
                issue_id: finding.issue_id.to_string(),
                severity: finding.severity.to_string(),
                impacted_dependency_name: name,
                impacted_dependency_version: version,
                fixed_versions: component.fixed_versions.clone(),
                cves: cves.clone(),
                components: Self::direct_dependencies(component_id, component),
            });
        }
        Ok(rows)
    }

    /// Direct dependencies through which the component is reached.
    ///
    /// Node `[0]` of an impact path is the scanned project, node `[1]` the
    /// direct dependency. Without any such path the component is its own
    /// direct dependency.
    fn direct_dependencies(component_id: &str, component: &Component) -> Vec<ComponentRow> {
        let mut seen: Vec<&str> = Vec::new();
        for path in &component.impact_paths {
            if let Some(direct) = path.get(1) {
                let id = direct.component_id.as_str();
                if !id.is_empty() && !seen.contains(&id) {
                    seen.push(id);
                }
            }
        }

        if seen.is_empty() {
            return vec![ComponentRow::from_component_id(component_id)];
        }
        seen.into_iter().map(ComponentRow::from_component_id).collect()
    }

    fn validate_issue_id(finding: &Finding<'_>) -> Result<(), DeltaError> {
        if finding.issue_id.trim().is_empty() {
            return Err(DeltaError::MalformedFinding {
                issue_id: finding.issue_id.to_string(),
                reason: "issue id is empty".to_string(),
            });
        }
        Ok(())
    }

    fn validate_component_id(finding: &Finding<'_>, component_id: &str) -> Result<(), DeltaError> {
        if component_id.trim().is_empty() {
            return Err(DeltaError::MalformedFinding {
                issue_id: finding.issue_id.to_string(),
                reason: "impacted component identifier is empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security_gate::domain::{Violation, Vulnerability};

    fn violation(id: &str, severity: &str, components: &[&str]) -> Violation {
        components.iter().fold(
            Violation::new(id, severity, "security").with_summary(format!("summary-{}", id)),
            |v, c| v.with_component(*c, Component::default()),
        )
    }

    fn vulnerability(id: &str, severity: &str, components: &[&str]) -> Vulnerability {
        components.iter().fold(
            Vulnerability::new(id, severity).with_summary(format!("summary-{}", id)),
            |v, c| v.with_component(*c, Component::default()),
        )
    }

    fn keys(rows: &[IssueRow]) -> Vec<(String, String)> {
        let mut keys: Vec<(String, String)> = rows
            .iter()
            .map(|r| (r.issue_id.clone(), r.impacted_dependency_name.clone()))
            .collect();
        keys.sort();
        keys
    }

    fn key(id: &str, name: &str) -> (String, String) {
        (id.to_string(), name.to_string())
    }

    #[test]
    fn test_new_violations_only_new_issue_reported() {
        let baseline = ScanResult::with_violations(vec![violation(
            "XRAY-1",
            "high",
            &["component-A", "component-B"],
        )]);
        let head = ScanResult::with_violations(vec![
            violation("XRAY-1", "high", &["component-A", "component-B"]),
            violation("XRAY-2", "low", &["component-C", "component-D"]),
        ]);

        let rows =
            DeltaEngine::new_issues(&[baseline], &[head], ScanMode::Violations, false).unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.issue_id == "XRAY-2" && r.severity == "low"));
        assert_eq!(
            keys(&rows),
            vec![key("XRAY-2", "component-C"), key("XRAY-2", "component-D")]
        );
    }

    #[test]
    fn test_new_violations_with_empty_baseline() {
        let baseline = ScanResult::default();
        let head = ScanResult::with_violations(vec![
            violation("XRAY-1", "high", &["component-A"]),
            violation("XRAY-2", "low", &["component-C"]),
        ]);

        let rows =
            DeltaEngine::new_issues(&[baseline], &[head], ScanMode::Violations, false).unwrap();

        assert_eq!(
            keys(&rows),
            vec![key("XRAY-1", "component-A"), key("XRAY-2", "component-C")]
        );
    }

    #[test]
    fn test_resolved_violations_are_never_new() {
        let baseline = ScanResult::with_violations(vec![
            violation("XRAY-1", "high", &["component-A"]),
            violation("XRAY-2", "low", &["component-C"]),
        ]);
        let head = ScanResult::default();

        let rows =
            DeltaEngine::new_issues(&[baseline], &[head], ScanMode::Violations, false).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_new_vulnerabilities_only_new_issue_reported() {
        let baseline = ScanResult::with_vulnerabilities(vec![vulnerability(
            "XRAY-1",
            "high",
            &["component-A", "component-B"],
        )]);
        let head = ScanResult::with_vulnerabilities(vec![
            vulnerability("XRAY-1", "high", &["component-A", "component-B"]),
            vulnerability("XRAY-2", "low", &["component-C", "component-D"]),
        ]);

        let rows =
            DeltaEngine::new_issues(&[baseline], &[head], ScanMode::Vulnerabilities, false)
                .unwrap();

        assert_eq!(
            keys(&rows),
            vec![key("XRAY-2", "component-C"), key("XRAY-2", "component-D")]
        );
    }

    #[test]
    fn test_new_vulnerabilities_with_empty_baseline() {
        let head = ScanResult::with_vulnerabilities(vec![
            vulnerability("XRAY-1", "high", &["component-A"]),
            vulnerability("XRAY-2", "low", &["component-B"]),
        ]);

        let rows = DeltaEngine::new_issues(
            &[ScanResult::default()],
            &[head],
            ScanMode::Vulnerabilities,
            false,
        )
        .unwrap();

        assert_eq!(
            keys(&rows),
            vec![key("XRAY-1", "component-A"), key("XRAY-2", "component-B")]
        );
    }

    #[test]
    fn test_same_issue_new_component_is_new() {
        let baseline =
            ScanResult::with_vulnerabilities(vec![vulnerability("XRAY-1", "high", &["npm://a:1.0.0"])]);
        let head = ScanResult::with_vulnerabilities(vec![vulnerability(
            "XRAY-1",
            "high",
            &["npm://a:1.0.0", "npm://b:2.0.0"],
        )]);

        let rows =
            DeltaEngine::new_issues(&[baseline], &[head], ScanMode::Vulnerabilities, false)
                .unwrap();

        assert_eq!(keys(&rows), vec![key("XRAY-1", "b")]);
    }

    #[test]
    fn test_version_bump_of_known_issue_is_not_new() {
        let baseline =
            ScanResult::with_vulnerabilities(vec![vulnerability("XRAY-1", "high", &["npm://a:1.0.0"])]);
        let head =
            ScanResult::with_vulnerabilities(vec![vulnerability("XRAY-1", "critical", &["npm://a:1.0.1"])]);

        let rows =
            DeltaEngine::new_issues(&[baseline], &[head], ScanMode::Vulnerabilities, false)
                .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_baseline_keys_cover_both_finding_kinds() {
        let baseline =
            ScanResult::with_vulnerabilities(vec![vulnerability("XRAY-1", "high", &["component-A"])]);
        let head = ScanResult::with_violations(vec![violation("XRAY-1", "high", &["component-A"])]);

        let rows =
            DeltaEngine::new_issues(&[baseline], &[head], ScanMode::Violations, false).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_violation_mode_ignores_vulnerabilities() {
        let head = ScanResult {
            violations: vec![violation("XRAY-1", "high", &["component-A"])],
            vulnerabilities: vec![vulnerability("XRAY-9", "critical", &["component-Z"])],
        };

        let rows = DeltaEngine::all_issues(&[head.clone()], ScanMode::Violations, false).unwrap();
        assert_eq!(keys(&rows), vec![key("XRAY-1", "component-A")]);

        let rows = DeltaEngine::all_issues(&[head], ScanMode::Vulnerabilities, false).unwrap();
        assert_eq!(keys(&rows), vec![key("XRAY-9", "component-Z")]);
    }

    #[test]
    fn test_all_vulnerabilities_expand_per_component() {
        let current = ScanResult::with_vulnerabilities(vec![
            vulnerability("XRAY-1", "high", &["component-A", "component-B"]),
            vulnerability("XRAY-2", "low", &["component-C", "component-D"]),
        ]);

        let rows = DeltaEngine::all_issues(&[current], ScanMode::Vulnerabilities, false).unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(
            keys(&rows),
            vec![
                key("XRAY-1", "component-A"),
                key("XRAY-1", "component-B"),
                key("XRAY-2", "component-C"),
                key("XRAY-2", "component-D"),
            ]
        );
        assert!(rows
            .iter()
            .filter(|r| r.issue_id == "XRAY-1")
            .all(|r| r.severity == "high"));
    }

    #[test]
    fn test_all_issues_empty_input() {
        let rows = DeltaEngine::all_issues(&[], ScanMode::Violations, false).unwrap();
        assert!(rows.is_empty());
        let rows = DeltaEngine::all_issues(&[], ScanMode::Vulnerabilities, true).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_multiple_head_results_are_flattened() {
        let first =
            ScanResult::with_vulnerabilities(vec![vulnerability("XRAY-1", "high", &["component-A"])]);
        let second =
            ScanResult::with_vulnerabilities(vec![vulnerability("XRAY-2", "low", &["component-B"])]);

        let rows =
            DeltaEngine::all_issues(&[first, second], ScanMode::Vulnerabilities, false).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_finding_without_components_yields_no_rows() {
        let current = ScanResult::with_vulnerabilities(vec![
            Vulnerability::new("XRAY-1", "high"),
            vulnerability("XRAY-2", "low", &["component-B"]),
        ]);

        let rows = DeltaEngine::all_issues(&[current], ScanMode::Vulnerabilities, false).unwrap();
        assert_eq!(keys(&rows), vec![key("XRAY-2", "component-B")]);
    }

    #[test]
    fn test_empty_issue_id_is_malformed() {
        let current =
            ScanResult::with_vulnerabilities(vec![vulnerability("", "high", &["component-A"])]);

        let err =
            DeltaEngine::all_issues(&[current], ScanMode::Vulnerabilities, false).unwrap_err();
        assert!(matches!(err, DeltaError::MalformedFinding { .. }));
    }

    #[test]
    fn test_empty_component_id_is_malformed() {
        let current = ScanResult::with_vulnerabilities(vec![vulnerability("XRAY-1", "high", &[""])]);

        let err =
            DeltaEngine::all_issues(&[current], ScanMode::Vulnerabilities, false).unwrap_err();
        assert_eq!(
            err,
            DeltaError::MalformedFinding {
                issue_id: "XRAY-1".to_string(),
                reason: "impacted component identifier is empty".to_string(),
            }
        );
    }

    #[test]
    fn test_license_violations_follow_include_licenses() {
        let head = ScanResult::with_violations(vec![
            Violation::new("LIC-1", "medium", "license")
                .with_component("npm://gpl-lib:1.0.0", Component::default()),
            violation("XRAY-1", "high", &["npm://a:1.0.0"]),
        ]);

        let rows = DeltaEngine::all_issues(&[head.clone()], ScanMode::Violations, false).unwrap();
        assert_eq!(keys(&rows), vec![key("XRAY-1", "a")]);

        let rows = DeltaEngine::all_issues(&[head], ScanMode::Violations, true).unwrap();
        assert_eq!(keys(&rows), vec![key("LIC-1", "gpl-lib"), key("XRAY-1", "a")]);
    }

    #[test]
    fn test_row_carries_versions_fixed_versions_and_cves() {
        let current = ScanResult::with_vulnerabilities(vec![Vulnerability::new("XRAY-7", "High")
            .with_cve("CVE-2022-24450")
            .with_cve("")
            .with_component(
                "go://github.com/nats-io/nats-streaming-server:v0.21.0",
                Component::default().with_fixed_versions(&["[0.24.1]"]),
            )]);

        let rows = DeltaEngine::all_issues(&[current], ScanMode::Vulnerabilities, false).unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(
            row.impacted_dependency_name,
            "github.com/nats-io/nats-streaming-server"
        );
        assert_eq!(row.impacted_dependency_version, "v0.21.0");
        assert_eq!(row.fixed_versions, vec!["[0.24.1]".to_string()]);
        assert_eq!(
            row.cves,
            vec![CveRow {
                id: "CVE-2022-24450".to_string()
            }]
        );
        assert_eq!(
            row.components,
            vec![ComponentRow {
                name: "github.com/nats-io/nats-streaming-server".to_string(),
                version: "v0.21.0".to_string(),
            }]
        );
    }

    #[test]
    fn test_direct_dependencies_from_impact_paths() {
        let component = Component::default()
            .with_impact_path(&["root", "npm://express:4.17.0", "npm://qs:6.5.0"])
            .with_impact_path(&["root", "npm://body-parser:1.19.0", "npm://qs:6.5.0"])
            .with_impact_path(&["root", "npm://express:4.17.0", "npm://x:1.0.0", "npm://qs:6.5.0"]);
        let current = ScanResult::with_vulnerabilities(vec![
            Vulnerability::new("XRAY-3", "Medium").with_component("npm://qs:6.5.0", component)
        ]);

        let rows = DeltaEngine::all_issues(&[current], ScanMode::Vulnerabilities, false).unwrap();

        assert_eq!(
            rows[0].components,
            vec![
                ComponentRow {
                    name: "express".to_string(),
                    version: "4.17.0".to_string()
                },
                ComponentRow {
                    name: "body-parser".to_string(),
                    version: "1.19.0".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_new_issues_is_subset_of_all_issues() {
        let baseline = ScanResult::with_vulnerabilities(vec![vulnerability(
            "XRAY-1",
            "high",
            &["component-A"],
        )]);
        let head = ScanResult::with_vulnerabilities(vec![
            vulnerability("XRAY-1", "high", &["component-A", "component-B"]),
            vulnerability("XRAY-2", "low", &["component-C"]),
        ]);

        let new_rows = DeltaEngine::new_issues(
            &[baseline.clone()],
            &[head.clone()],
            ScanMode::Vulnerabilities,
            false,
        )
        .unwrap();
        let all_rows =
            DeltaEngine::all_issues(&[head], ScanMode::Vulnerabilities, false).unwrap();

        assert!(new_rows.iter().all(|row| all_rows.contains(row)));

        let baseline_keys = DeltaEngine::identity_keys(&[baseline]).unwrap();
        assert!(new_rows.iter().all(|row| !baseline_keys.contains(&row.key())));
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let baseline =
            ScanResult::with_violations(vec![violation("XRAY-1", "high", &["component-A"])]);
        let head = ScanResult::with_violations(vec![violation("XRAY-2", "low", &["component-B"])]);
        let baseline_before = baseline.clone();
        let head_before = head.clone();

        let baseline_results = [baseline];
        let head_results = [head];
        DeltaEngine::new_issues(&baseline_results, &head_results, ScanMode::Violations, false)
            .unwrap();

        assert_eq!(baseline_results[0], baseline_before);
        assert_eq!(head_results[0], head_before);
    }
}
