pub mod issue_row;
pub mod scan_params;
pub mod scan_result;
pub mod severity;

pub use issue_row::{
    sort_for_display, split_component_id, ComponentRow, CveRow, IssueKey, IssueRow,
};
pub use scan_params::{ScanMode, ScanParams};
pub use scan_result::{Component, ComponentMap, Cve, ImpactPathNode, ScanResult, Violation, Vulnerability};
pub use severity::Severity;
