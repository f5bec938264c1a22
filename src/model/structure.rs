//! The ordered set of anatomical structures tracked per frame.

use thiserror::Error;

use crate::constants::{HOTKEYS, STRUCTURE_COLUMNS};

/// One tracked structure and the key that toggles it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    /// Column identifier (e.g. `LPW_PPW`)
    pub name: String,
    /// Single-character toggle key
    pub hotkey: char,
}

impl Structure {
    /// Create a structure with the given name and hotkey.
    pub fn new(name: impl Into<String>, hotkey: char) -> Self {
        Self {
            name: name.into(),
            hotkey,
        }
    }
}

/// Errors raised when building a [`StructureSchema`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// No structures were given
    #[error("Structure schema is empty")]
    Empty,

    /// Names and hotkeys differ in length
    #[error("{names} structure names but {hotkeys} hotkeys")]
    LengthMismatch {
        /// Number of structure names
        names: usize,
        /// Number of hotkeys
        hotkeys: usize,
    },

    /// Two structures share a hotkey
    #[error("Hotkey '{key}' is bound to both '{first}' and '{second}'")]
    HotkeyConflict {
        /// The shared key
        key: char,
        /// Structure that claimed the key first
        first: String,
        /// Structure that repeated it
        second: String,
    },

    /// Two structures share a name
    #[error("Structure '{0}' is listed twice")]
    DuplicateName(String),

    /// A structure name is blank
    #[error("Structure at position {0} has an empty name")]
    EmptyName(usize),
}

/// Ordered structure list with positionally bound hotkeys.
///
/// Every visibility and severity vector in the engine is aligned with this
/// order. No two structures share a name or a hotkey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureSchema {
    structures: Vec<Structure>,
}

impl StructureSchema {
    /// The reference 12-structure configuration.
    pub fn reference() -> Self {
        Self {
            structures: STRUCTURE_COLUMNS
                .iter()
                .zip(HOTKEYS)
                .map(|(name, key)| Structure::new(*name, key))
                .collect(),
        }
    }

    /// Build a schema from parallel name and hotkey lists.
    pub fn new<S: Into<String>>(names: Vec<S>, hotkeys: Vec<char>) -> Result<Self, SchemaError> {
        if names.len() != hotkeys.len() {
            return Err(SchemaError::LengthMismatch {
                names: names.len(),
                hotkeys: hotkeys.len(),
            });
        }
        Self::from_structures(
            names
                .into_iter()
                .zip(hotkeys)
                .map(|(name, key)| Structure::new(name, key))
                .collect(),
        )
    }

    /// Build a schema from a list of structures, validating uniqueness.
    pub fn from_structures(structures: Vec<Structure>) -> Result<Self, SchemaError> {
        if structures.is_empty() {
            return Err(SchemaError::Empty);
        }

        for (i, s) in structures.iter().enumerate() {
            if s.name.trim().is_empty() {
                return Err(SchemaError::EmptyName(i));
            }
            for earlier in &structures[..i] {
                if earlier.name == s.name {
                    return Err(SchemaError::DuplicateName(s.name.clone()));
                }
                if keys_match(earlier.hotkey, s.hotkey) {
                    return Err(SchemaError::HotkeyConflict {
                        key: s.hotkey,
                        first: earlier.name.clone(),
                        second: s.name.clone(),
                    });
                }
            }
        }

        Ok(Self { structures })
    }

    /// Number of structures (N).
    pub fn len(&self) -> usize {
        self.structures.len()
    }

    /// Always false for a validated schema.
    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    /// Iterate structures in column order.
    pub fn iter(&self) -> impl Iterator<Item = &Structure> {
        self.structures.iter()
    }

    /// Structure names in column order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.structures.iter().map(|s| s.name.as_str())
    }

    /// Get the structure at a position.
    pub fn get(&self, index: usize) -> Option<&Structure> {
        self.structures.get(index)
    }

    /// Position of a structure by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.structures.iter().position(|s| s.name == name)
    }

    /// Position of the structure toggled by `key`.
    ///
    /// Letters match regardless of case.
    pub fn index_for_hotkey(&self, key: char) -> Option<usize> {
        self.structures
            .iter()
            .position(|s| keys_match(s.hotkey, key))
    }
}

impl Default for StructureSchema {
    fn default() -> Self {
        Self::reference()
    }
}

fn keys_match(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
