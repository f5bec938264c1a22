//! Global constants for the FEES labeler

/// Application name, used for the per-user resource directory.
pub const APP_NAME: &str = "FEES-Labeler";

/// Label CSV written at the dataset root.
pub const LABELS_FILENAME: &str = "frame_labels.csv";

/// Baseline severity table looked up in the resource directory.
pub const PRELOAD_FILENAME: &str = "preload.csv";

/// `chrono` format for the suffix of label CSV backups.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Key columns that lead every label CSV row.
pub const KEY_COLUMNS: [&str; 3] = ["video", "swallow", "frame"];

/// Reference structure identifiers, in column order.
pub const STRUCTURE_COLUMNS: [&str; 12] = [
    "LPW_PPW",
    "B",
    "VT",
    "LC_LP",
    "RC_RP",
    "PCR",
    "LA_LAF",
    "RA_RAF",
    "IAS",
    "LSE",
    "LSAF_FVF",
    "AC_TVF_PC",
];

/// Toggle keys for the reference structures (same length as `STRUCTURE_COLUMNS`).
pub const HOTKEYS: [char; 12] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '0', '-', '='];

/// Historical preload headers and the canonical column each one maps to.
pub const PRELOAD_COLUMN_ALIASES: &[(&str, &str)] = &[
    ("video ID", "video"),
    ("swallow number", "swallow"),
    ("LPW-PPW", "LPW_PPW"),
    ("V-T", "VT"),
    ("LC-LP", "LC_LP"),
    ("RC-RP", "RC_RP"),
    ("LA-LAF", "LA_LAF"),
    ("RA-RAF", "RA_RAF"),
    ("LSAF-FVF", "LSAF_FVF"),
    ("AC-TVF-PC", "AC_TVF_PC"),
];

/// Frame image extensions (matched case-insensitively).
pub const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
