//! Front-end message types for the FEES labeler.
//!
//! Every command typed at the prompt is parsed into a [`Message`] before it
//! reaches the session, in the Elm architecture style.

use std::path::PathBuf;

/// Messages that can be sent to update the labeling session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Save the current frame and move to the next one
    NextFrame,
    /// Save the current frame and move to the previous one
    PrevFrame,
    /// Jump to a frame by its 1-based number, without saving
    GoTo(i64),
    /// Restrict navigation to 1-based frames `start..=end`
    SetRange(i64, i64),
    /// Navigate the whole sequence again
    ClearRange,

    // Structure toggles
    /// Flip the listed structures (0-based indices)
    Toggle(Vec<usize>),
    /// Mark every structure visible
    CheckAll,
    /// Clear every structure
    UncheckAll,

    // Files
    /// Save the current frame and write the label CSV
    Save,
    /// Replace the baseline with the table at this path
    LoadBaseline(PathBuf),
    /// Open another dataset folder
    OpenFolder(PathBuf),

    // Misc
    /// Print the command reference
    Help,
    /// Leave the front end
    Quit,
}
