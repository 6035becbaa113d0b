//! MQTT-style topic matching for state paths and request paths.
//!
//! - `+` matches exactly one level
//! - `#` matches any number of remaining levels, including none (last segment only)
//!
//! The client core has a handful of paths and subscribers, so patterns are
//! matched linearly instead of through an index.

/// Check whether a concrete `topic` matches `pattern`.
///
/// ```ignore
/// assert!(matches("auth/+", "auth/session"));
/// assert!(matches("edit/#", "edit"));
/// assert!(!matches("auth/+", "auth/session/extra"));
/// ```
pub fn matches(pattern: &str, topic: &str) -> bool {
    let mut pat = pattern.split('/');
    let mut top = topic.split('/');

    loop {
        match (pat.next(), top.next()) {
            (Some("#"), _) => return true,
            (Some("+"), Some(_)) => continue,
            (Some(p), Some(t)) if p == t => continue,
            (None, None) => return true,
            _ => return false,
        }
    }
}

/// Check that a pattern is well formed: no empty levels, `#` only last.
pub fn is_valid_pattern(pattern: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }
    let levels: Vec<&str> = pattern.split('/').collect();
    levels.iter().enumerate().all(|(i, level)| {
        !level.is_empty()
            && (*level != "#" || i == levels.len() - 1)
            && (level.len() == 1 || !level.contains(['+', '#']))
    })
}
