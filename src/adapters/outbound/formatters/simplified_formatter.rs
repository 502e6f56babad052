use super::markdown_formatter::{push_table_row, README_URL, TABLE_HEADER, TABLE_SEPARATOR};
use crate::ports::outbound::ReportFormatter;
use crate::security_gate::domain::IssueRow;

const NO_VULNERABILITIES_TEMPLATE: &str =
    include_str!("../../../../resources/messages/novulnerabilities_simplified.md");

/// SimplifiedReportFormatter adapter for providers that do not render images
///
/// Same table as the standard style, with a text banner and plain severity
/// cells.
pub struct SimplifiedReportFormatter;

impl SimplifiedReportFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimplifiedReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for SimplifiedReportFormatter {
    fn format(&self, rows: &[IssueRow]) -> String {
        if rows.is_empty() {
            return NO_VULNERABILITIES_TEMPLATE.to_string();
        }

        let mut output = format!(
            "**New security issues were found in this pull request.**\n\n[What is pr-vuln-gate?]({})\n\n",
            README_URL
        );
        output.push_str(TABLE_HEADER);
        output.push_str(TABLE_SEPARATOR);
        for row in rows {
            push_table_row(&mut output, &row.severity, row);
        }
        output
    }
}
