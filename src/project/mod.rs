// ABOUTME: Local project inspection: directory scanning and classification.
// ABOUTME: Never touches the network; works on an in-memory file list.

mod classify;
mod files;

pub use classify::{Classification, Language, classify, has_entry_point};
pub use files::{EXCLUDED_SEGMENTS, ProjectFile, is_excluded, scan_dir};
