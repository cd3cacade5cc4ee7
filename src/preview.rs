// ABOUTME: Local preview assembly for static projects.
// ABOUTME: Inlines every stylesheet into the entry page so it renders standalone.

use crate::project::ProjectFile;

/// Build a self-contained HTML document from the project files.
///
/// The first entry page (`index.html` at any depth) is the base. Every
/// stylesheet in the set is inlined as a `<style>` block at the end of
/// the page's `<head>`, in file order. Pages without a `</head>` tag keep
/// their stylesheets external. Returns `None` when there is no entry page
/// or it is not valid UTF-8.
pub fn assemble(files: &[ProjectFile]) -> Option<String> {
    let entry = files
        .iter()
        .find(|file| file.path == "index.html" || file.path.ends_with("/index.html"))?;
    let mut html = entry.text()?.to_string();

    for sheet in files.iter().filter(|file| file.path.ends_with(".css")) {
        let Some(css) = sheet.text() else { continue };
        html = html.replacen("</head>", &format!("<style>{css}</style></head>"), 1);
    }

    Some(html)
}
