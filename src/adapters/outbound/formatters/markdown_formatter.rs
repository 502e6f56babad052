use crate::ports::outbound::ReportFormatter;
use crate::security_gate::domain::{IssueRow, Severity};

/// Project readme, linked from every report
pub(super) const README_URL: &str = "https://github.com/pr-vuln-gate/pr-vuln-gate#readme";

/// Base URL of the banner and severity icon images
const RESOURCES_URL: &str = "https://raw.githubusercontent.com/pr-vuln-gate/pr-vuln-gate/main/resources/";

const VULNERABILITIES_BANNER: &str = "vulnerabilitiesBanner.png";

/// Message used when a working directory has no new issues
const NO_VULNERABILITIES_TEMPLATE: &str =
    include_str!("../../../../resources/messages/novulnerabilities.md");

/// Markdown table header shared by both report styles
pub(super) const TABLE_HEADER: &str = "| SEVERITY | DIRECT DEPENDENCIES | DIRECT DEPENDENCIES VERSIONS | IMPACTED DEPENDENCY NAME | IMPACTED DEPENDENCY VERSION | FIXED VERSIONS | CVE\n";

/// Markdown table separator line; severity and fixed versions are centered
pub(super) const TABLE_SEPARATOR: &str = ":--: | -- | -- | -- | -- | :--: | --";

/// Separator for several values inside one table cell
pub(super) const CELL_LINE_BREAK: &str = "<br>";

/// MarkdownReportFormatter adapter for the standard report style
///
/// Renders a banner, a link to the readme and one table line per row, with
/// a severity icon in front of every recognised severity.
pub struct MarkdownReportFormatter;

impl MarkdownReportFormatter {
    pub fn new() -> Self {
        Self
    }

    fn severity_cell(severity: &str) -> String {
        match Severity::parse(severity) {
            Some(level) => format!(
                "![]({}{}){}{:>8}",
                RESOURCES_URL,
                level.icon_file_name(),
                CELL_LINE_BREAK,
                severity
            ),
            None => format!("{:>8}", severity),
        }
    }
}

impl Default for MarkdownReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownReportFormatter {
    fn format(&self, rows: &[IssueRow]) -> String {
        if rows.is_empty() {
            return NO_VULNERABILITIES_TEMPLATE.to_string();
        }

        let mut output = format!(
            "[![]({}{})]({})\n\n[What is pr-vuln-gate?]({})\n\n",
            RESOURCES_URL, VULNERABILITIES_BANNER, README_URL, README_URL
        );
        output.push_str(TABLE_HEADER);
        output.push_str(TABLE_SEPARATOR);
        for row in rows {
            push_table_row(&mut output, &Self::severity_cell(&row.severity), row);
        }
        output
    }
}

/// Escapes pipe characters and newlines for safe Markdown table rendering
pub(super) fn escape_markdown_table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn join_cell<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values
        .map(escape_markdown_table_cell)
        .collect::<Vec<_>>()
        .join(CELL_LINE_BREAK)
}

/// Appends one table line. Every line starts on a new line and ends with a
/// single space after the last cell.
pub(super) fn push_table_row(output: &mut String, severity_cell: &str, row: &IssueRow) {
    let directs = join_cell(row.components.iter().map(|c| c.name.as_str()));
    let direct_versions = join_cell(row.components.iter().map(|c| c.version.as_str()));
    let fixed = join_cell(row.fixed_versions.iter().map(String::as_str));
    let cves = join_cell(row.cves.iter().map(|c| c.id.as_str()));

    output.push_str(&format!(
        "\n| {} | {} | {} | {} | {} | {} | {} ",
        severity_cell,
        directs,
        direct_versions,
        escape_markdown_table_cell(&row.impacted_dependency_name),
        escape_markdown_table_cell(&row.impacted_dependency_version),
        fixed,
        cves
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security_gate::domain::{ComponentRow, CveRow};

    fn row(
        severity: &str,
        name: &str,
        version: &str,
        fixed: &[&str],
        cves: &[&str],
    ) -> IssueRow {
        IssueRow {
            issue_id: String::new(),
            severity: severity.to_string(),
            impacted_dependency_name: name.to_string(),
            impacted_dependency_version: version.to_string(),
            fixed_versions: fixed.iter().map(|f| f.to_string()).collect(),
            cves: cves.iter().map(|id| CveRow { id: id.to_string() }).collect(),
            components: vec![ComponentRow {
                name: name.to_string(),
                version: version.to_string(),
            }],
        }
    }

    #[test]
    fn test_format_no_rows_renders_template() {
        let output = MarkdownReportFormatter::new().format(&[]);
        assert_eq!(
            output,
            "[![](https://raw.githubusercontent.com/pr-vuln-gate/pr-vuln-gate/main/resources/noVulnerabilityBanner.png)](https://github.com/pr-vuln-gate/pr-vuln-gate#readme)\n\n[What is pr-vuln-gate?](https://github.com/pr-vuln-gate/pr-vuln-gate#readme)\n"
        );
    }

    #[test]
    fn test_format_rows() {
        let rows = vec![
            row(
                "High",
                "github.com/nats-io/nats-streaming-server",
                "v0.21.0",
                &["[0.24.1]"],
                &["CVE-2022-24450"],
            ),
            row("High", "github.com/mholt/archiver/v3", "v3.5.1", &[], &[]),
            row(
                "Medium",
                "github.com/nats-io/nats-streaming-server",
                "v0.21.0",
                &["[0.24.3]"],
                &["CVE-2022-26652"],
            ),
        ];

        let output = MarkdownReportFormatter::new().format(&rows);

        let expected = "[![](https://raw.githubusercontent.com/pr-vuln-gate/pr-vuln-gate/main/resources/vulnerabilitiesBanner.png)](https://github.com/pr-vuln-gate/pr-vuln-gate#readme)\n\n\
[What is pr-vuln-gate?](https://github.com/pr-vuln-gate/pr-vuln-gate#readme)\n\n\
| SEVERITY | DIRECT DEPENDENCIES | DIRECT DEPENDENCIES VERSIONS | IMPACTED DEPENDENCY NAME | IMPACTED DEPENDENCY VERSION | FIXED VERSIONS | CVE\n\
:--: | -- | -- | -- | -- | :--: | --\n\
| ![](https://raw.githubusercontent.com/pr-vuln-gate/pr-vuln-gate/main/resources/highSeverity.png)<br>    High | github.com/nats-io/nats-streaming-server | v0.21.0 | github.com/nats-io/nats-streaming-server | v0.21.0 | [0.24.1] | CVE-2022-24450 \n\
| ![](https://raw.githubusercontent.com/pr-vuln-gate/pr-vuln-gate/main/resources/highSeverity.png)<br>    High | github.com/mholt/archiver/v3 | v3.5.1 | github.com/mholt/archiver/v3 | v3.5.1 |  |  \n\
| ![](https://raw.githubusercontent.com/pr-vuln-gate/pr-vuln-gate/main/resources/mediumSeverity.png)<br>  Medium | github.com/nats-io/nats-streaming-server | v0.21.0 | github.com/nats-io/nats-streaming-server | v0.21.0 | [0.24.3] | CVE-2022-26652 ";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_format_is_stable() {
        let rows = vec![row("Critical", "lodash", "4.17.20", &["4.17.21"], &["CVE-2021-23337"])];
        let formatter = MarkdownReportFormatter::new();
        assert_eq!(formatter.format(&rows), formatter.format(&rows));
    }

    #[test]
    fn test_unrecognized_severity_has_no_icon() {
        let rows = vec![row("Severe", "lodash", "4.17.20", &[], &[])];
        let output = MarkdownReportFormatter::new().format(&rows);
        assert!(output.ends_with("\n|   Severe | lodash | 4.17.20 | lodash | 4.17.20 |  |  "));
    }

    #[test]
    fn test_multiple_values_joined_with_line_break() {
        let mut issue = row(
            "Low",
            "qs",
            "6.5.0",
            &["6.5.3", "6.7.3"],
            &["CVE-2022-24999", "CVE-2017-1000048"],
        );
        issue.components = vec![
            ComponentRow {
                name: "express".to_string(),
                version: "4.17.0".to_string(),
            },
            ComponentRow {
                name: "body-parser".to_string(),
                version: "1.19.0".to_string(),
            },
        ];

        let output = MarkdownReportFormatter::new().format(&[issue]);

        assert!(output.contains(
            "| express<br>body-parser | 4.17.0<br>1.19.0 | qs | 6.5.0 | 6.5.3<br>6.7.3 | CVE-2022-24999<br>CVE-2017-1000048 "
        ));
    }

    #[test]
    fn test_escape_markdown_table_cell() {
        assert_eq!(escape_markdown_table_cell("a|b\nc"), "a\\|b c");
    }
}
