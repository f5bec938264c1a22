//! Baseline ("preload") severity table loading.
//!
//! The preload CSV holds one row per swallow with a `video`, a `swallow`, and
//! one severity column per structure. Older exports use the historical
//! headers in [`PRELOAD_COLUMN_ALIASES`], which are mapped to the canonical
//! names before lookup.

use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};

use crate::constants::{APP_NAME, PRELOAD_COLUMN_ALIASES, PRELOAD_FILENAME};
use crate::format::error::FormatError;
use crate::model::{SeverityVector, StructureSchema};
use crate::state::BaselineStore;

/// Map a historical preload header to its canonical column name.
pub fn canonical_column(name: &str) -> &str {
    PRELOAD_COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(name)
}

/// Load a baseline table from `path`.
///
/// Fails if the file can't be read, if `video`, `swallow`, or any structure
/// column is missing, or if a `video`/`swallow` cell is not an integer.
pub fn load_baseline(path: &Path, schema: &StructureSchema) -> Result<BaselineStore, FormatError> {
    let file = std::fs::File::open(path)?;
    let store = read_baseline_from(file, schema, Some(path))?;
    log::info!(
        "Loaded baseline for {} swallows from {:?}",
        store.len(),
        path
    );
    Ok(store)
}

/// Read a baseline table from any reader. See [`load_baseline`].
pub fn read_baseline_from<R: Read>(
    reader: R,
    schema: &StructureSchema,
    source: Option<&Path>,
) -> Result<BaselineStore, FormatError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = rdr.headers()?.clone();
    if header.is_empty() {
        return Err(FormatError::EmptyFile {
            path: source.map(Path::to_path_buf).unwrap_or_default(),
        });
    }

    let column = |name: &str| {
        header
            .iter()
            .position(|h| canonical_column(h.trim_start_matches('\u{feff}')) == name)
            .ok_or_else(|| FormatError::missing_column(name))
    };
    let video_col = column("video")?;
    let swallow_col = column("swallow")?;
    let structure_cols = schema
        .names()
        .map(column)
        .collect::<Result<Vec<usize>, _>>()?;

    let mut store = match source {
        Some(path) => BaselineStore::with_source(path),
        None => BaselineStore::empty(),
    };

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let video = key_cell(&record, video_col, "video", line)?;
        let swallow = key_cell(&record, swallow_col, "swallow", line)?;

        let severities: Vec<Option<f64>> = structure_cols
            .iter()
            .map(|&i| record.get(i).and_then(parse_severity))
            .collect();

        if !store.insert(video, swallow, SeverityVector::from(severities)) {
            log::debug!(
                "Ignoring repeated baseline row for video {}, swallow {} (line {})",
                video,
                swallow,
                line
            );
        }
    }

    Ok(store)
}

/// Parse a video/swallow cell. Integral floats such as `3.0` are accepted.
fn key_cell(record: &StringRecord, index: usize, column: &str, line: u64) -> Result<i64, FormatError> {
    let raw = record.get(index).unwrap_or("");
    let cell = raw.trim();

    if let Ok(v) = cell.parse::<i64>() {
        return Ok(v);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i64),
        _ => Err(FormatError::non_integer_key(column, raw, line)),
    }
}

/// Parse a severity cell; empty, non-numeric, NaN and infinite cells are missing.
fn parse_severity(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Per-user directory for read/write resources such as `preload.csv`.
///
/// `~/Library/Application Support/FEES-Labeler` on macOS,
/// `%APPDATA%\FEES-Labeler` on Windows, and `$XDG_DATA_HOME/FEES-Labeler`
/// (or `~/.local/share/FEES-Labeler`) on Linux. Created if missing.
pub fn resource_dir() -> Option<PathBuf> {
    let dir = dirs::data_dir()?.join(APP_NAME);
    if let Err(e) = std::fs::create_dir_all(&dir) {
        log::warn!("Could not create resource directory {:?}: {}", dir, e);
    }
    Some(dir)
}

/// Default baseline location inside [`resource_dir`].
pub fn default_preload_path() -> Option<PathBuf> {
    resource_dir().map(|dir| dir.join(PRELOAD_FILENAME))
}

/// Make sure a `preload.csv` exists in the resource directory.
///
/// On first run a `preload.csv` shipped next to the executable is copied
/// into place. Returns the target path whether or not it exists.
pub fn ensure_preload_csv() -> Option<PathBuf> {
    let target = default_preload_path()?;
    if target.exists() {
        return Some(target);
    }

    let bundled = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(PRELOAD_FILENAME)));
    if let Some(bundled) = bundled.filter(|p| p.exists()) {
        match std::fs::copy(&bundled, &target) {
            Ok(_) => log::info!("Copied bundled baseline {:?} to {:?}", bundled, target),
            Err(e) => log::warn!("Could not copy bundled baseline {:?}: {}", bundled, e),
        }
    }

    Some(target)
}

/// Load the baseline at `path` if the file exists.
///
/// `Ok(None)` means there is no baseline to load, which is a supported
/// configuration; `Err` means the file exists but could not be loaded.
pub fn load_optional_baseline(
    path: Option<&Path>,
    schema: &StructureSchema,
) -> Result<Option<BaselineStore>, FormatError> {
    match path {
        Some(path) if path.exists() => load_baseline(path, schema).map(Some),
        Some(path) => {
            log::info!("No baseline found at {:?}; severities default to 0", path);
            Ok(None)
        }
        None => Ok(None),
    }
}
