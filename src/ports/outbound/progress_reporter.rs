/// ProgressReporter port for user-facing progress lines
///
/// Progress goes to stderr so stdout stays free for reports. Diagnostics
/// meant for operators go through `tracing` instead.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Shows a spinner for a long-running step until the next report
    ///
    /// # Arguments
    /// * `message` - Description of the step in progress
    fn start_step(&self, message: &str);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
