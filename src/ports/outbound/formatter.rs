use crate::security_gate::domain::IssueRow;

/// ReportFormatter port for rendering issue rows into a comment body
///
/// Implementations must be pure: the same rows always render to the same
/// bytes, so an unchanged report can be recognised and left alone.
pub trait ReportFormatter {
    /// Renders `rows` in the given order
    ///
    /// # Arguments
    /// * `rows` - Rows to render; an empty slice renders the
    ///   "no issues found" message
    ///
    /// # Returns
    /// Markdown document for one working directory
    fn format(&self, rows: &[IssueRow]) -> String;
}

impl<T: ReportFormatter + ?Sized> ReportFormatter for Box<T> {
    fn format(&self, rows: &[IssueRow]) -> String {
        (**self).format(rows)
    }
}
