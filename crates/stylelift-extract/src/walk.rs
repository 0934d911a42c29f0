//! Finding documents.
//!
//! Every file is visited: hidden files, ignored directories and `.gitignore`
//! rules make no difference, the same as a plain recursive walk.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::warn;

use crate::error::ExtractError;

/// Extensions treated as HTML, compared ASCII case-insensitively.
const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

/// Whether `path` names an HTML document.
#[must_use]
pub fn is_html_path(path: &Path) -> bool {
    path.extension()
        .and_then(std::ffi::OsStr::to_str)
        .is_some_and(|ext| HTML_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// Every HTML document under `root`, sorted by path.
///
/// Entries that cannot be read are logged and skipped.
///
/// # Errors
///
/// Returns [`ExtractError::NotADirectory`] if `root` is not a directory.
pub fn discover(root: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    if !root.is_dir() {
        return Err(ExtractError::NotADirectory(root.to_path_buf()));
    }

    let mut builder = WalkBuilder::new(root);
    let _ = builder.standard_filters(false).hidden(false);

    let mut documents = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(%error, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_some_and(|t| t.is_file()) && is_html_path(entry.path()) {
            documents.push(entry.into_path());
        }
    }
    documents.sort();
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_extensions_ignore_case() {
        assert!(is_html_path(Path::new("a/index.html")));
        assert!(is_html_path(Path::new("PAGE.HTM")));
        assert!(is_html_path(Path::new("x.HtMl")));
        assert!(!is_html_path(Path::new("style.css")));
        assert!(!is_html_path(Path::new("html")));
        assert!(!is_html_path(Path::new("notes.xhtml")));
    }
}
