//! Per-structure value vectors aligned with a [`StructureSchema`](super::StructureSchema).

/// Per-frame visibility judgments, one 0/1 value per structure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibilityVector(Vec<bool>);

impl VisibilityVector {
    /// All structures unset.
    pub fn zeros(len: usize) -> Self {
        Self(vec![false; len])
    }

    /// Build from 0/1 values; anything other than 1 counts as not visible.
    pub fn from_bits(bits: &[u8]) -> Self {
        Self(bits.iter().map(|&b| b == 1).collect())
    }

    /// Number of structures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vector has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the structure at `index` is visible. Out of range reads as false.
    pub fn get(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// The value at `index` as written to CSV.
    pub fn bit(&self, index: usize) -> u8 {
        u8::from(self.get(index))
    }

    /// Set one value. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, visible: bool) {
        if let Some(v) = self.0.get_mut(index) {
            *v = visible;
        }
    }

    /// Flip one value and return the new state.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let v = self.0.get_mut(index)?;
        *v = !*v;
        Some(*v)
    }

    /// Set every value.
    pub fn fill(&mut self, visible: bool) {
        self.0.iter_mut().for_each(|v| *v = visible);
    }

    /// Values as 0/1.
    pub fn bits(&self) -> Vec<u8> {
        self.0.iter().map(|&v| u8::from(v)).collect()
    }

    /// Iterate values in structure order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    /// Number of structures marked visible.
    pub fn count_visible(&self) -> usize {
        self.0.iter().filter(|v| **v).count()
    }
}

impl From<Vec<bool>> for VisibilityVector {
    fn from(values: Vec<bool>) -> Self {
        Self(values)
    }
}

/// Swallow-level baseline severity per structure.
///
/// Values are usually 0-4 but any number is accepted; `None` marks a missing
/// or non-numeric cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeverityVector(Vec<Option<f64>>);

impl SeverityVector {
    /// All severities zero (the default when no baseline row exists).
    pub fn zeros(len: usize) -> Self {
        Self(vec![Some(0.0); len])
    }

    /// Number of structures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vector has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw value at `index`.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied().flatten()
    }

    /// Numeric value at `index`; missing and NaN read as 0.
    pub fn value_or_zero(&self, index: usize) -> f64 {
        match self.get(index) {
            Some(v) if !v.is_nan() => v,
            _ => 0.0,
        }
    }

    /// Value at `index` as written to the `_sev` column (truncated to an integer).
    ///
    /// Values beyond the `i64` range saturate; infinities never reach here
    /// from a loaded baseline because the loader stores them as missing.
    pub fn as_written(&self, index: usize) -> i64 {
        self.value_or_zero(index) as i64
    }
}

impl From<Vec<Option<f64>>> for SeverityVector {
    fn from(values: Vec<Option<f64>>) -> Self {
        Self(values)
    }
}

impl From<Vec<f64>> for SeverityVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values.into_iter().map(Some).collect())
    }
}

/// Derived per-structure flag: the frame's visibility differs from the baseline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverriddenVector(Vec<bool>);

impl OverriddenVector {
    /// Whether structure `index` is overridden.
    pub fn get(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Number of structures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vector has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Values as 0/1.
    pub fn bits(&self) -> Vec<u8> {
        self.0.iter().map(|&v| u8::from(v)).collect()
    }
}

impl FromIterator<bool> for OverriddenVector {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
