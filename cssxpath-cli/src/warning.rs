//! Deduplicated diagnostics for selectors that compile to something
//! the user may not expect.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Print a warning once per `(component, message)` pair.
///
/// Later calls with the same pair are silent until [`clear_warnings`].
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let mut warned = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if warned.get_or_insert_with(HashSet::new).insert(key) {
        eprintln!(
            "{} {}",
            format!("warning[{component}]:").yellow().bold(),
            message
        );
    }
}

/// Forget every warning printed so far.
pub fn clear_warnings() {
    let mut warned = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    *warned = None;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_warnings_resets_deduplication() {
        clear_warnings();
        warn_once("test", "first");
        warn_once("test", "first");
        {
            let warned = WARNED.lock().unwrap();
            assert_eq!(warned.as_ref().map(HashSet::len), Some(1));
        }
        clear_warnings();
        assert!(WARNED.lock().unwrap().is_none());
    }
}
