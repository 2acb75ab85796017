//! Atomic file replacement shared by the file-backed stores.
//!
//! Content goes to a sibling named after the full file name plus `.tmp`
//! (`birthdays.json.tmp`) first, is synced, then renamed over the
//! destination, so readers see either the old file or the new one.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Atomically replace `path` with `content`
pub fn write_atomically(path: &Path, content: &[u8]) -> Result<()> {
    write_atomically_with(path, |file| file.write_all(content))
}

/// Atomically replace `path` with whatever `write_fn` writes
pub fn write_atomically_with<F>(path: &Path, write_fn: F) -> Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let temp_path = temp_path_for(path);
    let mut file = File::create(&temp_path)
        .with_context(|| format!("failed to create {}", temp_path.display()))?;
    write_fn(&mut file).with_context(|| format!("failed to write {}", temp_path.display()))?;
    file.sync_all()
        .with_context(|| format!("failed to sync {}", temp_path.display()))?;

    fs::rename(&temp_path, path)
        .with_context(|| format!("failed to move {} into place", path.display()))?;
    Ok(())
}

/// Temp sibling for `path`, keeping the original extension so stores sharing
/// a directory never write to the same temp file
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
