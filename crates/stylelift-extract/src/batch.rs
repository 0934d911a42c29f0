//! Processing a directory tree.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ExtractError;
use crate::files::{FileReport, process_file, stylesheet_path};
use crate::walk::discover;

/// Options for [`run_batch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Run the pipeline but write nothing.
    pub dry_run: bool,
    /// Worker threads. `None` lets rayon pick; `Some(1)` is sequential.
    pub jobs: Option<usize>,
}

/// A document that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// Document path.
    pub path: PathBuf,
    /// What went wrong.
    pub error: String,
}

/// Outcome of a whole run. Documents appear in path order regardless of the
/// order they finished in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Directory that was walked.
    pub root: PathBuf,
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Documents that were processed, styled or not.
    pub files: Vec<FileReport>,
    /// Documents that failed.
    pub failures: Vec<Failure>,
}

impl BatchReport {
    /// Documents that had inline styles.
    pub fn rewritten(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.stylesheet.is_some())
    }

    /// Whether any document failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Extract inline styles from every HTML document under `root`.
///
/// Each document is processed on its own, in parallel unless
/// `options.jobs` is `Some(1)`. A document that fails is recorded in
/// [`BatchReport::failures`] and does not affect the others.
///
/// Documents are claimed in path order. When two documents share a
/// stylesheet path, the first one keeps it and the others fail with
/// [`ExtractError::StylesheetClaimed`] without being read.
///
/// # Errors
///
/// Fails only if `root` is not a directory or the worker pool cannot start.
pub fn run_batch(root: &Path, options: &RunOptions) -> Result<BatchReport, ExtractError> {
    let documents = discover(root)?;
    info!(root = %root.display(), documents = documents.len(), "found documents");

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = options.jobs {
        builder = builder.num_threads(jobs);
    }
    let pool = builder.build()?;

    let claims = claim_stylesheets(documents);
    let results: Vec<(PathBuf, Result<FileReport, ExtractError>)> = pool.install(|| {
        claims
            .into_par_iter()
            .map(|(path, owner)| {
                let result = match owner {
                    Some(owner) => Err(ExtractError::StylesheetClaimed {
                        stylesheet: stylesheet_path(&path),
                        path: path.clone(),
                        owner,
                    }),
                    None => process_file(&path, options.dry_run),
                };
                (path, result)
            })
            .collect()
    });

    let mut files = Vec::new();
    let mut failures = Vec::new();
    for (path, result) in results {
        match result {
            Ok(report) => files.push(report),
            Err(error) => {
                warn!(path = %path.display(), %error, "failed to process document");
                failures.push(Failure {
                    path,
                    error: error.to_string(),
                });
            }
        }
    }

    Ok(BatchReport {
        root: root.to_path_buf(),
        dry_run: options.dry_run,
        files,
        failures,
    })
}

/// Pair each document with the earlier document that already owns its
/// stylesheet path, if any.
fn claim_stylesheets(documents: Vec<PathBuf>) -> Vec<(PathBuf, Option<PathBuf>)> {
    let mut owners: HashMap<PathBuf, PathBuf> = HashMap::new();
    documents
        .into_iter()
        .map(|path| {
            let owner = match owners.entry(stylesheet_path(&path)) {
                Entry::Occupied(entry) => Some(entry.get().clone()),
                Entry::Vacant(entry) => {
                    let _ = entry.insert(path.clone());
                    None
                }
            };
            (path, owner)
        })
        .collect()
}
