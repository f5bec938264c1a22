//! Unit tests for the label and baseline formats.
//!
//! These tests cover schema detection, each legacy read path, the writer,
//! and round trips between them.

mod legacy_tests;

use crate::model::{FrameKey, StructureSchema, VisibilityVector};
use crate::state::LabelStore;

/// Three-structure schema that keeps test CSVs readable.
pub(super) fn small_schema() -> StructureSchema {
    StructureSchema::new(vec!["LPW_PPW", "B", "VT"], vec!['1', '2', '3']).unwrap()
}

/// Label store with a few frames across two swallows.
pub(super) fn sample_labels() -> LabelStore {
    let mut labels = LabelStore::new();
    labels.insert(FrameKey::new(1, 2, 1), VisibilityVector::from_bits(&[0, 0, 1]));
    labels.insert(FrameKey::new(1, 1, 2), VisibilityVector::from_bits(&[1, 1, 0]));
    labels.insert(FrameKey::new(1, 1, 1), VisibilityVector::from_bits(&[1, 0, 0]));
    labels
}
