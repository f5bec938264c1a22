//! Label CSV schema generations and per-row visibility extraction.

use csv::StringRecord;

use crate::constants::KEY_COLUMNS;
use crate::model::{FrameKey, StructureSchema, VisibilityVector};

/// Suffix of the visibility column in the current schema.
pub const VIS_SUFFIX: &str = "_vis";
/// Suffix of the severity column in the current schema.
pub const SEV_SUFFIX: &str = "_sev";
/// Suffix of the override flag column in the value/overridden schema.
pub const OVERRIDDEN_SUFFIX: &str = "_overridden";

/// The three on-disk label CSV layouts, newest first.
///
/// Selected once per file from the header by [`LabelSchema::detect`]; each
/// variant carries the column index that holds each structure's visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSchema {
    /// `<s>_sev`, `<s>_vis` pairs; visibility is read from `<s>_vis`.
    Current {
        /// Column index of `<s>_vis`, per structure
        columns: Vec<usize>,
    },
    /// `<s>_val`, `<s>_overridden` pairs; visibility is the value column
    /// immediately before each `<s>_overridden`.
    ValueOverridden {
        /// Column index of the value column, per structure
        columns: Vec<usize>,
    },
    /// One visibility column per structure right after the key columns.
    Plain {
        /// Number of structures
        width: usize,
    },
}

impl LabelSchema {
    /// Classify a header row.
    ///
    /// The current schema requires a `<s>_vis` column for every structure,
    /// the value/overridden schema a `<s>_overridden` column for every
    /// structure. Anything else is read as the plain schema.
    pub fn detect(header: &StringRecord, schema: &StructureSchema) -> Self {
        let position = |column: String| header.iter().position(|h| h == column);

        let vis: Option<Vec<usize>> = schema
            .names()
            .map(|s| position(format!("{s}{VIS_SUFFIX}")))
            .collect();
        if let Some(columns) = vis {
            return Self::Current { columns };
        }

        let overridden: Option<Vec<usize>> = schema
            .names()
            .map(|s| position(format!("{s}{OVERRIDDEN_SUFFIX}")))
            .collect();
        if let Some(flags) = overridden {
            return Self::ValueOverridden {
                columns: flags.iter().map(|i| i.saturating_sub(1)).collect(),
            };
        }

        Self::Plain {
            width: schema.len(),
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Current { .. } => "sev/vis",
            Self::ValueOverridden { .. } => "val/overridden",
            Self::Plain { .. } => "plain",
        }
    }

    /// Extract visibility from a data row.
    ///
    /// Only the value 1 counts as visible. In the plain schema a missing or
    /// unparsable cell reads as 0; in the other schemas it rejects the row.
    pub fn read_visibility(&self, record: &StringRecord) -> Option<VisibilityVector> {
        match self {
            Self::Current { columns } | Self::ValueOverridden { columns } => columns
                .iter()
                .map(|&i| record.get(i).and_then(parse_int).map(|v| v == 1))
                .collect::<Option<Vec<bool>>>()
                .map(VisibilityVector::from),
            Self::Plain { width } => {
                let first = KEY_COLUMNS.len();
                Some(VisibilityVector::from(
                    (first..first + width)
                        .map(|i| record.get(i).and_then(parse_int) == Some(1))
                        .collect::<Vec<bool>>(),
                ))
            }
        }
    }
}

/// Parse the leading (video, swallow, frame) cells. `None` for comment or corrupt rows.
pub fn read_key(record: &StringRecord) -> Option<FrameKey> {
    let cell = |i: usize| record.get(i).and_then(parse_int);
    Some(FrameKey::new(cell(0)?, cell(1)?, cell(2)?))
}

/// Parse an integer cell, ignoring surrounding whitespace.
pub(crate) fn parse_int(cell: &str) -> Option<i64> {
    cell.trim().parse().ok()
}
