use crate::shared::security::sanitize_archive_path;
use crate::shared::Result;
use anyhow::Context;
use flate2::read::GzDecoder;
use std::fs;
use std::path::Path;
use tar::EntryType;

/// Extracts a `.tar.gz` repository archive into `out_dir`
///
/// The archive's top-level directory is stripped. Only regular files and
/// directories are materialised; links are skipped.
///
/// # Errors
/// Returns an error if the archive is corrupt, an entry would land outside
/// `out_dir`, or a file cannot be written
pub fn extract_tar_gz(bytes: &[u8], out_dir: &Path) -> Result<()> {
    let gz = GzDecoder::new(bytes);
    let mut archive = tar::Archive::new(gz);

    fs::create_dir_all(out_dir)
        .with_context(|| format!("create {}", out_dir.display()))?;

    for entry in archive.entries().context("read tar entries")? {
        let mut entry = entry.context("read tar entry")?;
        let entry_path = entry.path()?.to_path_buf();
        let Some(rel) = sanitize_archive_path(&entry_path)? else {
            continue;
        };
        let out_path = out_dir.join(&rel);

        match entry.header().entry_type() {
            EntryType::Directory => {
                fs::create_dir_all(&out_path)
                    .with_context(|| format!("create {}", out_path.display()))?;
            }
            EntryType::Regular | EntryType::Continuous => {
                if let Some(parent) = out_path.parent() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("create {}", parent.display()))?;
                }
                entry
                    .unpack(&out_path)
                    .with_context(|| format!("unpack {}", out_path.display()))?;
            }
            other => {
                tracing::debug!(path = %rel.display(), entry_type = ?other, "Skipping archive entry");
            }
        }
    }
    Ok(())
}
