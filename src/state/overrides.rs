//! Override flags: where a frame's visibility departs from its swallow baseline.

use crate::model::{FrameKey, OverriddenVector, SeverityVector, VisibilityVector};
use crate::state::{BaselineStore, LabelStore};

/// Compare visibility against raw baseline severities.
///
/// `overridden[i]` is set when the 0/1 visibility differs numerically from
/// the severity code, so a checked structure is overridden against any
/// severity other than 1 (including 2-4). Missing severities count as 0.
pub fn overridden_flags(visibility: &VisibilityVector, severities: &SeverityVector) -> OverriddenVector {
    (0..visibility.len())
        .map(|i| f64::from(visibility.bit(i)) != severities.value_or_zero(i))
        .collect()
}

/// Result of recording a frame's visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideOutcome {
    /// Frame that was recorded
    pub key: FrameKey,
    /// Visibility written to the store
    pub visibility: VisibilityVector,
    /// Baseline severities used for the comparison
    pub severities: SeverityVector,
    /// Derived override flags
    pub overridden: OverriddenVector,
}

/// Record `visibility` for `key` and derive its override flags.
///
/// This is the only write path into the [`LabelStore`]: the entry for `key`
/// is inserted or overwritten with the supplied vector.
pub fn compute_override(
    labels: &mut LabelStore,
    baseline: &BaselineStore,
    key: FrameKey,
    visibility: VisibilityVector,
) -> OverrideOutcome {
    let severities = baseline.resolve(key.video, key.swallow, visibility.len());
    let overridden = overridden_flags(&visibility, &severities);
    labels.insert(key, visibility.clone());

    log::trace!(
        "Recorded {}: visible={:?} overridden={:?}",
        key,
        visibility.bits(),
        overridden.bits()
    );

    OverrideOutcome {
        key,
        visibility,
        severities,
        overridden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_against_higher_severity_is_overridden() {
        let vis = VisibilityVector::from_bits(&[1, 1, 0, 0, 1]);
        let sev = SeverityVector::from(vec![2.0, 1.0, 0.0, 3.0, 0.0]);
        assert_eq!(overridden_flags(&vis, &sev).bits(), vec![1, 0, 0, 1, 1]);
    }

    #[test]
    fn test_missing_severity_compares_as_zero() {
        let vis = VisibilityVector::from_bits(&[0, 1]);
        let sev = SeverityVector::from(vec![None, Some(f64::NAN)]);
        assert_eq!(overridden_flags(&vis, &sev).bits(), vec![0, 1]);
    }

    #[test]
    fn test_compute_override_writes_store() {
        let mut labels = LabelStore::new();
        let mut baseline = BaselineStore::empty();
        baseline.insert(1, 1, SeverityVector::from(vec![1.0, 0.0]));

        let key = FrameKey::new(1, 1, 5);
        let outcome = compute_override(
            &mut labels,
            &baseline,
            key,
            VisibilityVector::from_bits(&[1, 1]),
        );

        assert_eq!(outcome.overridden.bits(), vec![0, 1]);
        assert_eq!(labels.get(&key).unwrap().bits(), vec![1, 1]);
    }

    #[test]
    fn test_compute_override_without_baseline() {
        let mut labels = LabelStore::new();
        let outcome = compute_override(
            &mut labels,
            &BaselineStore::empty(),
            FrameKey::SENTINEL,
            VisibilityVector::from_bits(&[0, 1]),
        );
        assert_eq!(outcome.severities, SeverityVector::zeros(2));
        assert_eq!(outcome.overridden.bits(), vec![0, 1]);
        assert!(labels.contains(&FrameKey::SENTINEL));
    }
}
