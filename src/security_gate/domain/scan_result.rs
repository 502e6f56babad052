use std::collections::BTreeMap;

/// Violation type reported for license policy findings.
pub const LICENSE_VIOLATION_TYPE: &str = "license";

/// One node of a dependency path from the scanned project down to an
/// impacted component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImpactPathNode {
    pub component_id: String,
}

impl ImpactPathNode {
    pub fn new(component_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
        }
    }
}

/// Metadata for one impacted package occurrence.
///
/// The component identifier is the key of the owning finding's component
/// map; this value only carries the optional extras.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Component {
    pub fixed_versions: Vec<String>,
    pub impact_paths: Vec<Vec<ImpactPathNode>>,
}

impl Component {
    pub fn with_fixed_versions(mut self, fixed_versions: &[&str]) -> Self {
        self.fixed_versions = fixed_versions.iter().map(|v| v.to_string()).collect();
        self
    }

    /// Adds an impact path given as component identifiers, root first.
    pub fn with_impact_path(mut self, path: &[&str]) -> Self {
        self.impact_paths
            .push(path.iter().map(|id| ImpactPathNode::new(*id)).collect());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cve {
    pub id: String,
}

/// Impacted components keyed by component identifier.
///
/// A `BTreeMap` keeps row expansion order stable across runs.
pub type ComponentMap = BTreeMap<String, Component>;

/// A finding evaluated against a configured watch or project policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violation {
    pub issue_id: String,
    pub summary: String,
    pub severity: String,
    pub violation_type: String,
    pub cves: Vec<Cve>,
    pub components: ComponentMap,
}

impl Violation {
    pub fn new(
        issue_id: impl Into<String>,
        severity: impl Into<String>,
        violation_type: impl Into<String>,
    ) -> Self {
        Self {
            issue_id: issue_id.into(),
            severity: severity.into(),
            violation_type: violation_type.into(),
            ..Self::default()
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_cve(mut self, id: impl Into<String>) -> Self {
        self.cves.push(Cve { id: id.into() });
        self
    }

    pub fn with_component(mut self, id: impl Into<String>, component: Component) -> Self {
        self.components.insert(id.into(), component);
        self
    }

    pub fn is_license_violation(&self) -> bool {
        self.violation_type.eq_ignore_ascii_case(LICENSE_VIOLATION_TYPE)
    }
}

/// A raw scanner finding with no policy context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vulnerability {
    pub issue_id: String,
    pub summary: String,
    pub severity: String,
    pub cves: Vec<Cve>,
    pub components: ComponentMap,
}

impl Vulnerability {
    pub fn new(issue_id: impl Into<String>, severity: impl Into<String>) -> Self {
        Self {
            issue_id: issue_id.into(),
            severity: severity.into(),
            ..Self::default()
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_cve(mut self, id: impl Into<String>) -> Self {
        self.cves.push(Cve { id: id.into() });
        self
    }

    pub fn with_component(mut self, id: impl Into<String>, component: Component) -> Self {
        self.components.insert(id.into(), component);
        self
    }
}

/// Output of a single scan invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub violations: Vec<Violation>,
    pub vulnerabilities: Vec<Vulnerability>,
}

impl ScanResult {
    pub fn with_violations(violations: Vec<Violation>) -> Self {
        Self {
            violations,
            vulnerabilities: Vec::new(),
        }
    }

    pub fn with_vulnerabilities(vulnerabilities: Vec<Vulnerability>) -> Self {
        Self {
            violations: Vec::new(),
            vulnerabilities,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty() && self.vulnerabilities.is_empty()
    }
}
