use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

/// Errors that stop one document, or a whole batch, from being processed.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The document could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Document path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The document is not UTF-8.
    #[error("{} is not valid UTF-8: {source}", path.display())]
    InvalidUtf8 {
        /// Document path.
        path: PathBuf,
        /// Decoding error, with the offset of the first bad byte.
        source: FromUtf8Error,
    },

    /// The stylesheet or the rewritten document could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Another document in the batch already writes this document's
    /// stylesheet, as `page.html` and `page.htm` would.
    #[error(
        "{} would overwrite {}, which belongs to {}",
        path.display(),
        stylesheet.display(),
        owner.display()
    )]
    StylesheetClaimed {
        /// Document that was skipped.
        path: PathBuf,
        /// Stylesheet both documents map to.
        stylesheet: PathBuf,
        /// Document that keeps the stylesheet.
        owner: PathBuf,
    },

    /// The path has no file name to derive a stylesheet name from.
    #[error("{} has no file name", .0.display())]
    NoFileName(PathBuf),

    /// The batch root is missing or is not a directory.
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The worker pool could not be started.
    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
