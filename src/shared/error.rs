use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish a failed security gate
/// from a tool that could not finish its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - no new issues, or the gate is configured not to fail
    Success = 0,
    /// New security issues were found and the gate is configured to fail
    SecurityIssuesFound = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (configuration, install, scan, VCS API, I/O, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps a terminal error to the exit code CI should observe.
    pub fn from_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<GateError>() {
            Some(GateError::SecurityIssuesFound) => ExitCode::SecurityIssuesFound,
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::SecurityIssuesFound => write!(f, "Security Issues Found (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Message of the distinguished gate failure.
pub const SECURITY_ISSUES_FOUND_MESSAGE: &str = "Issues were detected by the security scan";

/// Application-specific errors for the pull request security gate.
///
/// `SecurityIssuesFound` is an expected outcome, not a crash: callers
/// downcast to it to tell a failed gate apart from infrastructure errors.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("Invalid configuration: {message}\n\n💡 Hint: Please check the configuration file and the VCS parameters")]
    Configuration { message: String },

    #[error("Failed to install dependencies in {working_dir} using '{command}'\nDetails: {details}\n\n💡 Hint: Verify that the install command is available and succeeds locally")]
    Install {
        working_dir: PathBuf,
        command: String,
        details: String,
    },

    #[error("Security scan failed in {working_dir}\nDetails: {details}")]
    Scan {
        working_dir: PathBuf,
        details: String,
    },

    #[error("{}", SECURITY_ISSUES_FOUND_MESSAGE)]
    SecurityIssuesFound,

    #[error("Failed to get the '{environment}' environment of the repository\nDetails: {details}\n\n💡 Hint: Create the '{environment}' environment in the repository settings")]
    MissingEnvironment {
        environment: String,
        details: String,
    },

    #[error("The '{environment}' environment has no required reviewers\n\n💡 Hint: Add at least one required reviewer to the '{environment}' environment")]
    MissingReviewers { environment: String },

    #[error("VCS operation '{operation}' failed\nDetails: {details}")]
    Vcs { operation: String, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl GateError {
    /// Shorthand for configuration errors raised during validation.
    pub fn configuration(message: impl Into<String>) -> Self {
        GateError::Configuration {
            message: message.into(),
        }
    }
}
