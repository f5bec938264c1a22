//! On-disk formats: label CSV, baseline table, and backups.
//!
//! ## Label CSV
//!
//! Labels are always written in the current schema:
//!
//! ```text
//! video,swallow,frame,LPW_PPW_sev,LPW_PPW_vis,B_sev,B_vis,...
//! 1,1,1,2,1,0,0,...
//! ```
//!
//! Reading accepts three generations, detected from the header
//! (see [`LabelSchema`]):
//!
//! - **sev/vis**: `<s>_sev`, `<s>_vis` pairs (current)
//! - **val/overridden**: `<s>_val`, `<s>_overridden` pairs
//! - **plain**: one visibility column per structure
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fees_labeler::format::{read_labels, write_labels};
//!
//! let labels = read_labels(&path, &schema)?;
//! write_labels(&path, &labels, &baseline, &schema)?;
//! ```

mod backup;
mod error;
mod label_csv;
mod preload;
mod schema;

pub use backup::{backup_existing, backup_path};
pub use error::FormatError;
pub use label_csv::{label_header, read_labels, read_labels_from, serialize_labels, write_labels};
pub use preload::{
    canonical_column, default_preload_path, ensure_preload_csv, load_baseline,
    load_optional_baseline, read_baseline_from, resource_dir,
};
pub use schema::{LabelSchema, OVERRIDDEN_SUFFIX, SEV_SUFFIX, VIS_SUFFIX, read_key};

#[cfg(test)]
mod tests;
