//! FEES Labeler - frame visibility labeling for swallow studies
//!
//! A reviewer steps through frames extracted from FEES videos and marks which
//! anatomical structures are visible in each one. Labels are resumed from and
//! saved to `frame_labels.csv` at the dataset root, alongside the swallow-level
//! severities from a baseline ("preload") table.
//!
//! The engine lives in [`session::LabelSession`]; [`terminal`] is a
//! line-driven front end on top of it.

pub mod config;
pub mod constants;
pub mod format;
pub mod keybindings;
pub mod message;
pub mod model;
pub mod session;
pub mod state;
pub mod terminal;

pub use session::{FrameView, LabelSession, OpenSummary, SessionError, StepOutcome};
