//! Common utilities for stylelift.
//!
//! This crate provides shared infrastructure used by all components:
//! - **Warning System** - deduplicated, colored terminal output for recoverable
//!   problems in the input (stray end tags, unterminated comments, ...)

pub mod warning;
