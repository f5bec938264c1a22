//! Default visibility for frames that have not been labeled yet.

use crate::model::{FrameKey, VisibilityVector};
use crate::state::LabelStore;

/// Visibility to show when arriving at `sequence[position]`.
///
/// A stored entry for the frame always wins. Otherwise the entry of the
/// immediately preceding frame in sequence order is carried forward, falling
/// back to all-unset when that frame has no entry or this is the first frame.
/// Never mutates the store.
pub fn resolve_default_vector(
    labels: &LabelStore,
    sequence: &[FrameKey],
    position: usize,
    width: usize,
) -> VisibilityVector {
    let Some(key) = sequence.get(position) else {
        return VisibilityVector::zeros(width);
    };

    if let Some(stored) = labels.get(key) {
        return stored.clone();
    }

    position
        .checked_sub(1)
        .and_then(|prev| sequence.get(prev))
        .and_then(|prev_key| labels.get(prev_key))
        .cloned()
        .unwrap_or_else(|| VisibilityVector::zeros(width))
}
