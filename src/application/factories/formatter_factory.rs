use crate::adapters::outbound::formatters::{MarkdownReportFormatter, SimplifiedReportFormatter};
use crate::application::dto::OutputStyle;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating report formatters
///
/// This factory encapsulates the creation logic for the report styles,
/// following the Factory Pattern. It belongs in the application layer as it
/// orchestrates the selection of infrastructure adapters based on
/// configuration.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output style
    ///
    /// # Examples
    /// ```
    /// use pr_vuln_gate::application::dto::OutputStyle;
    /// use pr_vuln_gate::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputStyle::Standard);
    /// ```
    pub fn create(style: OutputStyle) -> Box<dyn ReportFormatter + Send + Sync> {
        match style {
            OutputStyle::Standard => Box::new(MarkdownReportFormatter::new()),
            OutputStyle::Simplified => Box::new(SimplifiedReportFormatter::new()),
        }
    }
}
