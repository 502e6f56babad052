use crate::shared::Result;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Maximum configuration file size (1 MB)
/// This prevents DoS attacks via excessively large configuration files
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// # Security
/// This function uses `symlink_metadata()` instead of `metadata()` to ensure
/// we check the symlink itself, not the target it points to.
///
/// # Errors
/// Returns an error if the path is a symbolic link or if metadata cannot be read
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, {} operations on symbolic links are not allowed.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Validates that a path exists, is a regular file and is not larger than `max_size`
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file exceeds `max_size` bytes
pub fn validate_regular_file(path: &Path, file_description: &str, max_size: u64) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    if metadata.len() > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            metadata.len(),
            max_size
        );
    }

    Ok(())
}

/// Maps a repository archive entry to a path relative to the extraction root.
///
/// VCS archives wrap the tree in a single top-level directory
/// (`repo-<sha>/...`), which is stripped. Returns `None` for the top-level
/// directory entry itself.
///
/// # Security
/// Absolute paths and `..` components are rejected so that an archive can
/// never write outside the extraction root.
pub fn sanitize_archive_path(path: &Path) -> Result<Option<PathBuf>> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                anyhow::bail!(
                    "Security: archive entry {} is an absolute path",
                    path.display()
                )
            }
            Component::ParentDir => {
                anyhow::bail!(
                    "Security: archive entry {} escapes the extraction directory",
                    path.display()
                )
            }
            Component::CurDir => {}
            Component::Normal(part) => out.push(part),
        }
    }

    let mut parts = out.components();
    if parts.next().is_none() {
        return Ok(None);
    }
    let stripped: PathBuf = parts.collect();
    if stripped.as_os_str().is_empty() {
        return Ok(None);
    }
    Ok(Some(stripped))
}
