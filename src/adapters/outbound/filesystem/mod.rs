/// Filesystem adapters for archive extraction and report output
mod archive;
mod file_writer;

pub use archive::extract_tar_gz;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
