//! Warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning once per file
//! when a whole directory of documents shares the same quirk.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::{OwoColorize, Stream};

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recoverable problem (prints once per unique message).
///
/// Returns true if the message was printed, false if it had been seen before.
///
/// # Example
/// ```
/// use stylelift_common::warning::warn_once;
///
/// let _ = warn_once("HTML", "unmatched end tag </div>");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        let line = format!("[stylelift {component}] ⚠ {message}");
        eprintln!(
            "{}",
            line.if_supports_color(Stream::Stderr, |text| text.yellow())
        );
    }
    should_print
}

/// Clear all recorded warnings.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
