//! Structure toggle keys and command key conflicts.
//!
//! Each structure is toggled by one character. The line-driven front end
//! also reserves a few single letters for commands, so a structure key must
//! not shadow one of those.

use crate::model::StructureSchema;

/// Single-letter commands of the terminal front end and what they do.
pub const COMMAND_KEYS: &[(char, &str)] = &[
    ('n', "Next frame"),
    ('p', "Previous frame"),
    ('g', "Go to frame"),
    ('q', "Quit"),
];

/// Keybinding lookup for structure toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    /// Toggle key per structure, in schema order
    structure_keys: Vec<char>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_schema(&StructureSchema::reference())
    }
}

impl KeyBindings {
    /// Take the toggle keys from a structure schema.
    pub fn from_schema(schema: &StructureSchema) -> Self {
        Self {
            structure_keys: schema.iter().map(|s| s.hotkey).collect(),
        }
    }

    /// Get the structure index (0-based) bound to a key, ignoring case.
    pub fn structure_index_for_key(&self, key: char) -> Option<usize> {
        self.structure_keys
            .iter()
            .position(|k| k.to_lowercase().eq(key.to_lowercase()))
    }

    /// Get the key bound to structure `index`.
    pub fn key_for_structure(&self, index: usize) -> Option<char> {
        self.structure_keys.get(index).copied()
    }

    /// First structure key that shadows a command, with the command's description.
    pub fn command_conflict(&self) -> Option<(char, &'static str)> {
        self.structure_keys.iter().find_map(|&key| {
            let lower = key.to_ascii_lowercase();
            COMMAND_KEYS
                .iter()
                .find(|(k, _)| *k == lower)
                .map(|(_, command)| (key, *command))
        })
    }

    /// Structure indices for a line made only of toggle keys (spaces ignored).
    ///
    /// Returns `None` if the line is blank or contains any other character.
    pub fn parse_toggle_line(&self, line: &str) -> Option<Vec<usize>> {
        let indices = line
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| self.structure_index_for_key(c))
            .collect::<Option<Vec<usize>>>()?;
        (!indices.is_empty()).then_some(indices)
    }
}

/// Convert a key to a display string.
pub fn key_to_string(key: char) -> String {
    match key {
        ' ' => "Space".to_string(),
        '\t' => "Tab".to_string(),
        c => c.to_uppercase().to_string(),
    }
}
