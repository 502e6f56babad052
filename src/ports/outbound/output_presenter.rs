use crate::shared::Result;

/// OutputPresenter port for presenting rendered reports locally
///
/// Used for `--output` and dry runs, where reports are written to a file or
/// stdout instead of (or in addition to) being published on the pull request.
pub trait OutputPresenter {
    /// Presents the rendered report content
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - The destination is a symbolic link
    fn present(&self, content: &str) -> Result<()>;
}
