// ABOUTME: Scans the selected directory into an in-memory file list.
// ABOUTME: Reads run concurrently; the result is path-sorted for stable upload order.

use bytes::Bytes;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory segments that are never scanned or uploaded.
pub const EXCLUDED_SEGMENTS: &[&str] = &["node_modules", ".git", "dist", ".next"];

/// How many file reads run at once.
const READ_CONCURRENCY: usize = 16;

/// A project file held in memory.
///
/// Identity is the path relative to the selected root, with forward slashes
/// on every platform. Content is immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    pub path: String,
    pub content: Bytes,
}

impl ProjectFile {
    pub fn new(path: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Content as text, or `None` when it is not valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }
}

/// True when any path segment names an excluded directory.
///
/// Matching is per segment, not substring, so `.github/workflows/ci.yml`
/// survives the `.git` exclusion and `distillery.html` survives `dist`.
pub fn is_excluded(path: &str, extra: &[String]) -> bool {
    path.split('/').any(|segment| {
        EXCLUDED_SEGMENTS.contains(&segment) || extra.iter().any(|e| e == segment)
    })
}

/// Read every file under `root` into memory, skipping excluded segments.
///
/// Reads are concurrent with no ordering requirement among themselves; the
/// returned list is sorted by path so later upload order is deterministic.
pub async fn scan_dir(root: &Path, extra_exclude: &[String]) -> std::io::Result<Vec<ProjectFile>> {
    let mut paths: Vec<(String, PathBuf)> = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !EXCLUDED_SEGMENTS.iter().any(|s| *s == name)
                && !extra_exclude.iter().any(|e| *e == name)
        });

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");
        paths.push((relative, entry.into_path()));
    }

    let mut files: Vec<ProjectFile> = stream::iter(paths)
        .map(|(relative, absolute)| async move {
            let content = tokio::fs::read(&absolute).await?;
            Ok::<_, std::io::Error>(ProjectFile::new(relative, content))
        })
        .buffer_unordered(READ_CONCURRENCY)
        .try_collect()
        .await?;

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}
