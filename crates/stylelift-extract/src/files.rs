//! Reading documents and writing the stylesheet and rewritten document.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::ExtractError;
use crate::pipeline::{Outcome, PipelineStage, process_document};

/// `<document-path-without-extension>.css`
#[must_use]
pub fn stylesheet_path(document: &Path) -> PathBuf {
    document.with_extension("css")
}

/// The link target for a document's stylesheet: its file name, since both
/// files live in the same directory.
///
/// # Errors
///
/// Returns [`ExtractError::NoFileName`] for paths like `/` or `..`.
pub fn stylesheet_href(document: &Path) -> Result<String, ExtractError> {
    stylesheet_path(document)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| ExtractError::NoFileName(document.to_path_buf()))
}

/// What happened to one document on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Document path.
    pub path: PathBuf,
    /// The stylesheet written, or that would be written on a dry run. `None`
    /// when the document had no inline styles.
    pub stylesheet: Option<PathBuf>,
    /// Last pipeline stage reached.
    pub stage: PipelineStage,
    /// Elements whose `style` was removed.
    pub styled: usize,
    /// Rules in the stylesheet.
    pub rules: usize,
    /// Synthetic identities added to the document.
    pub synthetic: usize,
    /// Problems the parser recovered from.
    pub parse_issues: usize,
    /// Whether anything was actually written.
    pub written: bool,
}

/// Extract the inline styles of the document at `path`.
///
/// When the document has inline styles the stylesheet is written first, then
/// the document is overwritten. A document with none is left alone. With
/// `dry_run` nothing is written, but the report is the same.
///
/// # Errors
///
/// Fails if the document cannot be read, is not UTF-8, or either output
/// cannot be written. If writing the document fails the stylesheet may
/// already exist.
pub fn process_file(path: &Path, dry_run: bool) -> Result<FileReport, ExtractError> {
    let bytes = fs::read(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let html = String::from_utf8(bytes).map_err(|source| ExtractError::InvalidUtf8 {
        path: path.to_path_buf(),
        source,
    })?;

    let href = stylesheet_href(path)?;
    let outcome = process_document(&html, &href);
    let stage = outcome.stage();
    let parse_issues = outcome.issues().len();

    let Outcome::Rewritten(extraction) = outcome else {
        debug!(path = %path.display(), "no inline styles");
        return Ok(FileReport {
            path: path.to_path_buf(),
            stylesheet: None,
            stage,
            styled: 0,
            rules: 0,
            synthetic: 0,
            parse_issues,
            written: false,
        });
    };

    let css_path = stylesheet_path(path);
    if !dry_run {
        write(&css_path, &extraction.stylesheet)?;
        info!(path = %css_path.display(), rules = extraction.rules, "created stylesheet");
        write(path, &extraction.document)?;
        info!(path = %path.display(), styled = extraction.styled(), "rewrote document");
    }

    Ok(FileReport {
        path: path.to_path_buf(),
        stylesheet: Some(css_path),
        stage,
        styled: extraction.styled(),
        rules: extraction.rules,
        synthetic: extraction.synthetic(),
        parse_issues,
        written: !dry_run,
    })
}

fn write(path: &Path, contents: &str) -> Result<(), ExtractError> {
    fs::write(path, contents).map_err(|source| ExtractError::Write {
        path: path.to_path_buf(),
        source,
    })
}
