//! Label CSV reader (all schema generations) and writer (current schema).

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Terminator, WriterBuilder};

use crate::constants::KEY_COLUMNS;
use crate::format::error::FormatError;
use crate::format::schema::{LabelSchema, SEV_SUFFIX, VIS_SUFFIX, read_key};
use crate::model::StructureSchema;
use crate::state::{BaselineStore, LabelStore};

/// Read a label CSV written by any schema generation.
pub fn read_labels(path: &Path, schema: &StructureSchema) -> Result<LabelStore, FormatError> {
    log::info!("Loading labels from {:?}", path);
    let file = std::fs::File::open(path)?;
    read_labels_from(file, schema)
}

/// Read label CSV content from any reader. See [`read_labels`].
///
/// Rows whose key cells are not integers are skipped. When a key repeats,
/// the later row wins. An empty input yields an empty store.
pub fn read_labels_from<R: Read>(
    reader: R,
    schema: &StructureSchema,
) -> Result<LabelStore, FormatError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = rdr.headers()?.clone();
    let mut labels = LabelStore::new();
    if header.is_empty() {
        return Ok(labels);
    }

    let layout = LabelSchema::detect(&header, schema);
    log::debug!("Label CSV uses the {} schema", layout.name());

    let mut skipped = 0usize;
    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                log::warn!("Skipping unreadable label row: {}", e);
                skipped += 1;
                continue;
            }
        };

        let Some(key) = read_key(&record) else {
            skipped += 1;
            continue;
        };

        match layout.read_visibility(&record) {
            Some(visibility) => {
                labels.insert(key, visibility);
            }
            None => {
                log::warn!("Skipping row for {} with malformed visibility cells", key);
                skipped += 1;
            }
        }
    }

    log::info!(
        "Loaded {} labeled frames ({} rows skipped)",
        labels.len(),
        skipped
    );
    Ok(labels)
}

/// Header of the current schema: keys, then `<s>_sev`, `<s>_vis` per structure.
pub fn label_header(schema: &StructureSchema) -> Vec<String> {
    let mut header: Vec<String> = KEY_COLUMNS.iter().map(|c| c.to_string()).collect();
    for name in schema.names() {
        header.push(format!("{name}{SEV_SUFFIX}"));
        header.push(format!("{name}{VIS_SUFFIX}"));
    }
    header
}

/// Serialize the whole label store in the current schema.
///
/// Rows are sorted by (video, swallow, frame). Severities come from the
/// baseline (0 when absent or not a number) and are written as integers.
pub fn serialize_labels(
    labels: &LabelStore,
    baseline: &BaselineStore,
    schema: &StructureSchema,
) -> Result<Vec<u8>, FormatError> {
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    wtr.write_record(label_header(schema))?;

    let width = schema.len();
    for (key, visibility) in labels.iter() {
        let severities = baseline.resolve(key.video, key.swallow, width);
        let mut row = Vec::with_capacity(KEY_COLUMNS.len() + 2 * width);
        row.push(key.video.to_string());
        row.push(key.swallow.to_string());
        row.push(key.frame.to_string());
        for i in 0..width {
            row.push(severities.as_written(i).to_string());
            row.push(visibility.bit(i).to_string());
        }
        wtr.write_record(&row)?;
    }

    wtr.into_inner().map_err(|e| FormatError::Io(e.into_error()))
}

/// Write the whole label store to `path`, replacing its contents.
///
/// The file is only opened once every row has been serialized, so a failure
/// while building rows leaves the previous file intact.
pub fn write_labels(
    path: &Path,
    labels: &LabelStore,
    baseline: &BaselineStore,
    schema: &StructureSchema,
) -> Result<usize, FormatError> {
    let bytes = serialize_labels(labels, baseline, schema)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;

    log::debug!("Saved {} labeled frames to {:?}", labels.len(), path);
    Ok(labels.len())
}
