//! Swallow-level baseline severities.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use crate::model::SeverityVector;

/// Mapping from (video, swallow) to the baseline severity of each structure.
///
/// An empty store is a supported state: every lookup then resolves to
/// all-zero severities. The store is replaced wholesale when a new baseline
/// source is selected, never merged.
#[derive(Debug, Clone, Default)]
pub struct BaselineStore {
    rows: HashMap<(i64, i64), SeverityVector>,
    source: Option<PathBuf>,
}

impl BaselineStore {
    /// A store with no baseline source.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create an empty store that records where its rows came from.
    pub fn with_source(source: impl Into<PathBuf>) -> Self {
        Self {
            rows: HashMap::new(),
            source: Some(source.into()),
        }
    }

    /// Add a row. The first row for a (video, swallow) pair wins; returns
    /// false if the pair was already present.
    pub fn insert(&mut self, video: i64, swallow: i64, severities: SeverityVector) -> bool {
        match self.rows.entry((video, swallow)) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(severities);
                true
            }
        }
    }

    /// Severities recorded for a swallow, if any.
    pub fn get(&self, video: i64, swallow: i64) -> Option<&SeverityVector> {
        self.rows.get(&(video, swallow))
    }

    /// Severities for a swallow, or all zeros of length `width` when absent.
    pub fn resolve(&self, video: i64, swallow: i64, width: usize) -> SeverityVector {
        self.get(video, swallow)
            .cloned()
            .unwrap_or_else(|| SeverityVector::zeros(width))
    }

    /// Number of swallows with a baseline row.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no baseline rows are loaded.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The file this baseline was loaded from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
