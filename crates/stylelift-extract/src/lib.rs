//! Inline style extraction for whole documents and directory trees.
//!
//! # Scope
//!
//! This crate provides:
//! - **Document Rewriting** - strip `style` attributes and link the generated
//!   stylesheet from `head`
//! - **Pipeline** - parse, resolve selectors, emit the stylesheet and
//!   serialize the rewritten document, all in memory
//! - **File Output** - the stylesheet next to the document, then the document
//! - **Discovery** - every `.html`/`.htm` file under a directory
//! - **Batch Processing** - many documents at once, each independent, with
//!   failures recorded instead of aborting the run
//!
//! # Not Yet Implemented
//!
//! - Merging the stylesheets of several documents into one
//! - Encodings other than UTF-8

mod batch;
mod error;
mod files;
mod pipeline;
mod rewrite;
mod walk;

pub use stylelift_css as css;
pub use stylelift_dom as dom;
pub use stylelift_html as html;

pub use batch::{BatchReport, Failure, RunOptions, run_batch};
pub use error::ExtractError;
pub use files::{FileReport, process_file, stylesheet_href, stylesheet_path};
pub use pipeline::{Extraction, Outcome, PipelineStage, process_document};
pub use rewrite::{STYLESHEET_REL, rewrite};
pub use walk::{discover, is_html_path};
