//! Diagnostics with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the character reference consumer to report parse errors and by
//! the CLI to report recoverable problems with its inputs.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Record `key` in the global set. Returns true the first time a key is seen.
fn record(key: String) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Warn about a recoverable problem (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("Character Reference", "unknown-named-character-reference");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if record(format!("[{component}] {message}")) {
        eprintln!("{}", format!("[ampersand {component}] ⚠ {message}").yellow());
    }
}

/// Number of distinct warnings printed since the last [`clear_warnings`].
#[must_use]
pub fn warning_count() -> usize {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map_or(0, HashSet::len)
}

/// Clear all recorded warnings (call before decoding an unrelated document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deduplicates() {
        assert!(record("[test] dedup-key".to_string()));
        assert!(!record("[test] dedup-key".to_string()));
        assert!(record("[test] dedup-key-2".to_string()));
    }

    #[test]
    fn test_warn_once_does_not_panic_on_repeat() {
        warn_once("test", "repeated message");
        warn_once("test", "repeated message");
        assert!(!record("[test] repeated message".to_string()));
    }
}
