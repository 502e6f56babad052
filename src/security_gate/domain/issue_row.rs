use super::severity::Severity;

/// A direct dependency through which an impacted component is pulled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentRow {
    pub name: String,
    pub version: String,
}

impl ComponentRow {
    /// Builds a row from a scanner component identifier.
    pub fn from_component_id(component_id: &str) -> Self {
        let (name, version) = split_component_id(component_id);
        Self { name, version }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CveRow {
    pub id: String,
}

/// One (issue, impacted component) pair prepared for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueRow {
    pub issue_id: String,
    pub severity: String,
    pub impacted_dependency_name: String,
    pub impacted_dependency_version: String,
    pub fixed_versions: Vec<String>,
    pub cves: Vec<CveRow>,
    pub components: Vec<ComponentRow>,
}

impl IssueRow {
    pub fn key(&self) -> IssueKey {
        IssueKey::new(&self.issue_id, &self.impacted_dependency_name)
    }
}

/// Deduplication identity of a finding: the issue id plus the impacted
/// dependency name. Severity and version are deliberately not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IssueKey {
    pub issue_id: String,
    pub impacted_dependency_name: String,
}

impl IssueKey {
    pub fn new(issue_id: &str, impacted_dependency_name: &str) -> Self {
        Self {
            issue_id: issue_id.to_string(),
            impacted_dependency_name: impacted_dependency_name.to_string(),
        }
    }
}

/// Splits a scanner component identifier into `(name, version)`.
///
/// Identifiers look like `npm://lodash:4.17.20` or
/// `go://github.com/nats-io/nats-server:v2.1.0`. The package-type prefix is
/// dropped and the remainder is split on the last `:`. Identifiers without a
/// `:` are treated as a bare name with an empty version.
pub fn split_component_id(component_id: &str) -> (String, String) {
    let without_prefix = component_id
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(component_id);

    match without_prefix.rsplit_once(':') {
        Some((name, version)) => (name.to_string(), version.to_string()),
        None => (without_prefix.to_string(), String::new()),
    }
}

/// Orders rows for display: most severe first, then by issue id and
/// impacted dependency name. Stable, so equal keys keep expansion order.
pub fn sort_for_display(rows: &mut [IssueRow]) {
    rows.sort_by(|a, b| {
        Severity::rank(&a.severity)
            .cmp(&Severity::rank(&b.severity))
            .then_with(|| a.issue_id.cmp(&b.issue_id))
            .then_with(|| a.impacted_dependency_name.cmp(&b.impacted_dependency_name))
    });
}
