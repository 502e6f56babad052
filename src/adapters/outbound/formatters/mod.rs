/// Formatter adapters for the pull request report styles
mod markdown_formatter;
mod simplified_formatter;

pub use markdown_formatter::MarkdownReportFormatter;
pub use simplified_formatter::SimplifiedReportFormatter;
