//! Session state: label and baseline stores, defaults, overrides and navigation.

mod baseline;
mod dataset;
mod defaults;
mod labels;
mod navigation;
mod overrides;

pub use baseline::BaselineStore;
pub use dataset::{DatasetError, DatasetState, is_frame_filename};
pub use defaults::resolve_default_vector;
pub use labels::LabelStore;
pub use navigation::{FrameNavigator, NavigationError};
pub use overrides::{OverrideOutcome, compute_override, overridden_flags};
