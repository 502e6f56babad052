/// Which kind of finding the gate reports on.
///
/// Decided up front from configuration: watches or a project key mean the
/// scanner evaluates policies and reports violations; without either the
/// scanner can only report raw vulnerabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Violations,
    Vulnerabilities,
}

impl std::fmt::Display for ScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanMode::Violations => write!(f, "violations"),
            ScanMode::Vulnerabilities => write!(f, "vulnerabilities"),
        }
    }
}

/// Parameters of one scan request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanParams {
    pub watches: Vec<String>,
    pub project_key: String,
    pub include_vulnerabilities: bool,
    pub include_licenses: bool,
}

impl ScanParams {
    pub fn mode(&self) -> ScanMode {
        if !self.watches.is_empty() || !self.project_key.is_empty() {
            ScanMode::Violations
        } else {
            ScanMode::Vulnerabilities
        }
    }
}
