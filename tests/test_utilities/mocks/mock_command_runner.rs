use async_trait::async_trait;
use pr_vuln_gate::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// One recorded invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub dir: PathBuf,
}

/// Mock CommandRunner standing in for both the scanner CLI and installers
///
/// Invocations of `scanner_program` print the head or baseline scan output,
/// depending on whether they run under `head_root`. Anything else is an
/// install command and succeeds unless `failing_install` is set.
#[derive(Clone)]
pub struct MockCommandRunner {
    scanner_program: String,
    head_root: PathBuf,
    head_output: String,
    baseline_output: String,
    failing_install: bool,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

#[allow(dead_code)]
impl MockCommandRunner {
    pub fn new(scanner_program: &str, head_root: &Path) -> Self {
        Self {
            scanner_program: scanner_program.to_string(),
            head_root: head_root.to_path_buf(),
            head_output: String::new(),
            baseline_output: String::new(),
            failing_install: false,
            calls: Arc::default(),
        }
    }

    pub fn with_head_output(mut self, json: &str) -> Self {
        self.head_output = json.to_string();
        self
    }

    pub fn with_baseline_output(mut self, json: &str) -> Self {
        self.baseline_output = json.to_string();
        self
    }

    pub fn with_failing_install(mut self) -> Self {
        self.failing_install = true;
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn scanner_calls(&self) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.program == self.scanner_program)
            .collect()
    }
}

#[async_trait]
impl CommandRunner for MockCommandRunner {
    async fn run(&self, program: &str, args: &[String], dir: &Path) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(RecordedCall {
            program: program.to_string(),
            args: args.to_vec(),
            dir: dir.to_path_buf(),
        });

        if program != self.scanner_program {
            return Ok(CommandOutput {
                status_code: Some(if self.failing_install { 1 } else { 0 }),
                stdout: String::new(),
                stderr: if self.failing_install {
                    "npm ERR! code E404".to_string()
                } else {
                    String::new()
                },
            });
        }

        let stdout = if dir.starts_with(&self.head_root) {
            self.head_output.clone()
        } else {
            self.baseline_output.clone()
        };
        Ok(CommandOutput {
            status_code: Some(0),
            stdout,
            stderr: String::new(),
        })
    }
}
