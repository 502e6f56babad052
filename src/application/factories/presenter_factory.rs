use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::PathBuf;

/// Presenter type enumeration for factory pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

/// Factory for creating local report presenters
pub struct PresenterFactory;

impl PresenterFactory {
    /// Creates a presenter instance for the specified type
    ///
    /// # Examples
    /// ```
    /// use pr_vuln_gate::application::factories::{PresenterFactory, PresenterType};
    ///
    /// let presenter = PresenterFactory::create(PresenterType::Stdout);
    /// ```
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }

    /// Picks the presenter for a run: `--output` wins, dry runs fall back to
    /// stdout, otherwise reports are only published.
    pub fn for_run(output: Option<PathBuf>, dry_run: bool) -> Option<PresenterType> {
        match output {
            Some(path) => Some(PresenterType::File(path)),
            None if dry_run => Some(PresenterType::Stdout),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_stdout_presenter() {
        let presenter = PresenterFactory::create(PresenterType::Stdout);
        assert!(presenter.present("report").is_ok());
    }

    #[test]
    fn test_create_file_presenter() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("report.md");
        let presenter = PresenterFactory::create(PresenterType::File(path.clone()));
        presenter.present("report").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_for_run() {
        let path = PathBuf::from("report.md");
        assert_eq!(
            PresenterFactory::for_run(Some(path.clone()), true),
            Some(PresenterType::File(path))
        );
        assert_eq!(
            PresenterFactory::for_run(None, true),
            Some(PresenterType::Stdout)
        );
        assert_eq!(PresenterFactory::for_run(None, false), None);
    }
}
