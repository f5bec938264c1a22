//! Dataset discovery: the ordered frame sequence under a dataset root.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::constants::{FRAME_EXTENSIONS, LABELS_FILENAME};
use crate::model::FrameKey;

/// Errors raised while discovering frames.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The dataset root could not be listed
    #[error("Failed to read folder {path:?}: {source}")]
    ReadDir {
        /// Folder that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// No `video*/swallow*/*frame_*` images were found
    #[error("No images matching video*/swallow*/*frame_*.png|jpg|jpeg found in {0:?}")]
    NoFrames(PathBuf),
}

/// Check if a file name looks like a frame image (`*frame_*.<png|jpg|jpeg>`).
pub fn is_frame_filename(name: &str) -> bool {
    if name.starts_with('.') || !name.contains("frame_") {
        return false;
    }
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| FRAME_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// A dataset root and its frames in sequence order.
#[derive(Clone, Debug)]
pub struct DatasetState {
    /// Dataset root folder
    pub root: PathBuf,
    /// Frame paths, sorted lexically by their full path string
    pub frames: Vec<PathBuf>,
    /// Key of each frame, parallel to `frames`
    pub keys: Vec<FrameKey>,
}

impl DatasetState {
    /// Discover `video*/swallow*/*frame_*` images under `root`.
    ///
    /// The sequence is ordered by the full path string (not numerically), so
    /// `frame_10` sorts before `frame_2`. Carry-forward defaults depend on
    /// this order.
    pub fn from_folder(root: impl Into<PathBuf>) -> Result<Self, DatasetError> {
        let root = root.into();
        let mut frames = Vec::new();

        for video_dir in list_dirs_with_prefix(&root, "video")? {
            let swallow_dirs = match list_dirs_with_prefix(&video_dir, "swallow") {
                Ok(dirs) => dirs,
                Err(e) => {
                    log::warn!("Skipping {:?}: {}", video_dir, e);
                    continue;
                }
            };

            for swallow_dir in swallow_dirs {
                if let Err(e) = scan_frames(&swallow_dir, &mut frames) {
                    log::warn!("Skipping {:?}: {}", swallow_dir, e);
                }
            }
        }

        if frames.is_empty() {
            return Err(DatasetError::NoFrames(root));
        }

        frames.sort_by_cached_key(|p| p.to_string_lossy().into_owned());
        let keys: Vec<FrameKey> = frames.iter().map(|p| FrameKey::from_path(p)).collect();

        let unparsed = keys.iter().filter(|k| k.is_sentinel()).count();
        if unparsed > 0 {
            log::warn!(
                "{} frames have no video/swallow/frame numbers in their path and share key {}",
                unparsed,
                FrameKey::SENTINEL
            );
        }

        log::info!("Scanned dataset {:?}: found {} frames", root, frames.len());

        Ok(Self { root, frames, keys })
    }

    /// Where the label CSV for this dataset lives.
    pub fn labels_path(&self) -> PathBuf {
        self.root.join(LABELS_FILENAME)
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the dataset has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Path of the frame at `index`.
    pub fn frame(&self, index: usize) -> Option<&Path> {
        self.frames.get(index).map(PathBuf::as_path)
    }

    /// Key of the frame at `index`.
    pub fn key(&self, index: usize) -> Option<FrameKey> {
        self.keys.get(index).copied()
    }

    /// Frame path relative to the dataset root, for display.
    pub fn display_name(&self, index: usize) -> String {
        let Some(path) = self.frame(index) else {
            return "Unknown".to_string();
        };
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }
}

/// Subdirectories of `dir` whose names start with `prefix`.
fn list_dirs_with_prefix(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>, DatasetError> {
    let entries = std::fs::read_dir(dir).map_err(|source| DatasetError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    Ok(entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_dir()
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(prefix))
        })
        .collect())
}

/// Push every frame image directly inside `dir`.
fn scan_frames(dir: &Path, frames: &mut Vec<PathBuf>) -> Result<(), DatasetError> {
    let entries = std::fs::read_dir(dir).map_err(|source| DatasetError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        let is_frame = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_frame_filename);
        if is_frame && path.is_file() {
            frames.push(path);
        }
    }

    Ok(())
}
