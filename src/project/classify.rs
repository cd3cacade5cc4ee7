// ABOUTME: Infers project language and existing infrastructure from file paths.
// ABOUTME: Only the package manifest is ever read; everything else is path matching.

use std::fmt;

use super::files::ProjectFile;

/// Canonical container descriptor filename.
pub const CONTAINER_FILE: &str = "Dockerfile";

/// Canonical CI pipeline directory segment.
pub const PIPELINE_DIR: &str = ".github/workflows";

const MANIFEST: &str = "package.json";

/// Quoted dependency tokens that mark a bundler-framework project.
const BUNDLER_TOKENS: &[&str] = &["\"vite\"", "'vite'"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Unknown,
    Node,
    Python,
    Static,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::Unknown => "unknown",
            Language::Node => "node",
            Language::Python => "python",
            Language::Static => "static",
        })
    }
}

/// What the classifier learned about the project.
///
/// Derived per deployment attempt and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub language: Language,
    pub has_container_file: bool,
    pub has_pipeline: bool,
    pub is_bundler_framework: bool,
}

/// Classify the file list.
///
/// A `package.json` at the root or one level deep wins; its text is scanned
/// for a quoted bundler dependency token. An unreadable manifest still
/// classifies as Node, just without the bundler hint. Otherwise any path
/// containing `requirements.txt` means Python, and everything else is a
/// static site.
pub fn classify(files: &[ProjectFile]) -> Classification {
    let manifest = files.iter().find(|f| is_manifest_path(&f.path));

    let (language, is_bundler_framework) = match manifest {
        Some(file) => {
            let bundler = file
                .text()
                .map(|text| BUNDLER_TOKENS.iter().any(|token| text.contains(token)))
                .unwrap_or(false);
            (Language::Node, bundler)
        }
        None if files.iter().any(|f| f.path.contains("requirements.txt")) => {
            (Language::Python, false)
        }
        None => (Language::Static, false),
    };

    Classification {
        language,
        has_container_file: files.iter().any(|f| f.path.ends_with(CONTAINER_FILE)),
        has_pipeline: files.iter().any(|f| f.path.contains(PIPELINE_DIR)),
        is_bundler_framework,
    }
}

/// True when an `index.html` exists anywhere in the set.
///
/// Static hosting needs an entry point; absence is a warning, never an error.
pub fn has_entry_point(files: &[ProjectFile]) -> bool {
    files
        .iter()
        .any(|f| f.path == "index.html" || f.path.ends_with("/index.html"))
}

fn is_manifest_path(path: &str) -> bool {
    path == MANIFEST || (path.matches('/').count() == 1 && path.ends_with("/package.json"))
}
