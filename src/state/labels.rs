//! In-memory label store: the single source of truth for frame visibility.

use std::collections::BTreeMap;

use crate::model::{FrameKey, VisibilityVector};

/// Mapping from frame key to the visibility marked for that frame.
///
/// Entries are only ever inserted or overwritten; the store never shrinks
/// during a session. Iteration is in ascending key order.
///
/// Outside the crate entries are written through
/// [`compute_override`](crate::state::compute_override) only:
///
/// ```compile_fail
/// use fees_labeler::model::{FrameKey, VisibilityVector};
/// use fees_labeler::state::LabelStore;
///
/// let mut labels = LabelStore::new();
/// labels.insert(FrameKey::new(1, 1, 1), VisibilityVector::zeros(12));
/// ```
///
/// ```
/// use fees_labeler::model::{FrameKey, VisibilityVector};
/// use fees_labeler::state::{BaselineStore, LabelStore, compute_override};
///
/// let mut labels = LabelStore::new();
/// let key = FrameKey::new(1, 1, 1);
/// compute_override(&mut labels, &BaselineStore::empty(), key, VisibilityVector::zeros(12));
/// assert!(labels.contains(&key));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelStore {
    entries: BTreeMap<FrameKey, VisibilityVector>,
}

impl LabelStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Visibility stored for `key`, if the frame has been labeled.
    pub fn get(&self, key: &FrameKey) -> Option<&VisibilityVector> {
        self.entries.get(key)
    }

    /// Whether `key` has an entry.
    pub fn contains(&self, key: &FrameKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or overwrite the entry for `key`, returning the previous value.
    pub(crate) fn insert(&mut self, key: FrameKey, visibility: VisibilityVector) -> Option<VisibilityVector> {
        self.entries.insert(key, visibility)
    }

    /// Number of labeled frames.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no frame has been labeled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted ascending by (video, swallow, frame).
    pub fn iter(&self) -> impl Iterator<Item = (&FrameKey, &VisibilityVector)> {
        self.entries.iter()
    }
}

impl FromIterator<(FrameKey, VisibilityVector)> for LabelStore {
    /// Later items overwrite earlier ones with the same key.
    fn from_iter<I: IntoIterator<Item = (FrameKey, VisibilityVector)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
