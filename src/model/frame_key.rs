//! Frame identity parsed from dataset paths.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Matches `.../video<N>/swallow<M>/...frame_<F>.<ext>` on a `/`-normalized path.
static FRAME_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)video(\d+)/swallow(\d+)/.*?frame_(\d+)\.(?:png|jpg|jpeg)$")
        .expect("frame path pattern should compile")
});

/// Identifies one labeled image by (video, swallow, frame).
///
/// Ordering is lexicographic over the three fields, which is the row order of
/// the label CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameKey {
    /// Video number
    pub video: i64,
    /// Swallow number within the video
    pub swallow: i64,
    /// Frame number within the swallow
    pub frame: i64,
}

impl FrameKey {
    /// Key given to paths that do not follow the dataset layout.
    pub const SENTINEL: FrameKey = FrameKey::new(-1, -1, -1);

    /// Create a key from its three components.
    pub const fn new(video: i64, swallow: i64, frame: i64) -> Self {
        Self {
            video,
            swallow,
            frame,
        }
    }

    /// Parse a key out of a frame path.
    ///
    /// Backslashes are treated as separators. Paths that don't match the
    /// `video<N>/swallow<M>/*frame_<F>.<png|jpg|jpeg>` layout yield
    /// [`FrameKey::SENTINEL`]; callers group those like any other key.
    pub fn from_path(path: &Path) -> Self {
        Self::from_path_str(&path.to_string_lossy())
    }

    /// Parse a key out of a path string. See [`FrameKey::from_path`].
    pub fn from_path_str(path: &str) -> Self {
        let normalized = path.replace('\\', "/");
        let Some(caps) = FRAME_PATH.captures(&normalized) else {
            return Self::SENTINEL;
        };

        let component = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<i64>().ok());
        match (component(1), component(2), component(3)) {
            (Some(video), Some(swallow), Some(frame)) => Self::new(video, swallow, frame),
            _ => Self::SENTINEL,
        }
    }

    /// Whether this is the key for an unparsable path.
    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }
}

impl fmt::Display for FrameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "video {}, swallow {}, frame {}",
            self.video, self.swallow, self.frame
        )
    }
}
