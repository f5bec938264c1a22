//! Timestamped backups of an existing label CSV.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::constants::BACKUP_TIMESTAMP_FORMAT;
use crate::format::error::FormatError;

/// Backup path for `original` at `now`: `<original>.bak.<YYYYMMDD_HHMMSS>`.
pub fn backup_path(original: &Path, now: DateTime<Local>) -> PathBuf {
    let mut name = original.as_os_str().to_owned();
    name.push(format!(".bak.{}", now.format(BACKUP_TIMESTAMP_FORMAT)));
    PathBuf::from(name)
}

/// Copy `original` to a timestamped backup next to it.
///
/// Returns `Ok(None)` when there is nothing to back up.
pub fn backup_existing(original: &Path) -> Result<Option<PathBuf>, FormatError> {
    if !original.exists() {
        return Ok(None);
    }

    let target = backup_path(original, Local::now());
    std::fs::copy(original, &target)?;
    log::info!("Backed up existing CSV to {:?}", target);
    Ok(Some(target))
}
