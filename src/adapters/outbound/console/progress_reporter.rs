use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr so it doesn't interfere with reports on stdout.
/// Long-running steps are shown with an indicatif spinner.
pub struct StderrProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn create_spinner(message: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("   {spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }

    fn finish_spinner(&self) {
        if let Ok(mut guard) = self.spinner.lock() {
            if let Some(spinner) = guard.take() {
                spinner.finish_and_clear();
            }
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.finish_spinner();
        eprintln!("{}", message);
    }

    fn start_step(&self, message: &str) {
        self.finish_spinner();
        if let Ok(mut guard) = self.spinner.lock() {
            *guard = Some(Self::create_spinner(message));
        }
    }

    fn report_error(&self, message: &str) {
        self.finish_spinner();
        eprintln!("{}", message);
    }

    fn report_completion(&self, message: &str) {
        self.finish_spinner();
        eprintln!();
        eprintln!("{}", message);
    }
}
