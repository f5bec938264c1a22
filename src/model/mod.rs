//! Data models for the frame labeler.

mod frame_key;
mod structure;
mod vectors;

pub use frame_key::FrameKey;
pub use structure::{SchemaError, Structure, StructureSchema};
pub use vectors::{OverriddenVector, SeverityVector, VisibilityVector};
