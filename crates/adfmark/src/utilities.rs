//! Utility functions and constants for line-oriented text scanning.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length of a sub-task summary, in characters
pub const SUMMARY_LIMIT: usize = 255;

/// Maximum length of a synthesized fallback description, in characters
pub const FALLBACK_DESCRIPTION_LIMIT: usize = 2000;

/// Maximum length of solution text reused as a sub-task description
pub const SOLUTION_DESCRIPTION_LIMIT: usize = 5000;

static BULLET_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*]\s+").unwrap());
static NUMBER_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+[.)]\s+").unwrap());
static LIST_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+[.)]|[-*])\s+").unwrap());

/// Truncate to at most `limit` characters
pub fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Count characters, not bytes
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Strip a leading `-` or `*` bullet marker
pub fn strip_bullet(line: &str) -> &str {
    BULLET_MARKER.find(line).map_or(line, |m| &line[m.end()..])
}

/// Strip a leading `1.` or `1)` number marker
pub fn strip_number(line: &str) -> &str {
    NUMBER_MARKER.find(line).map_or(line, |m| &line[m.end()..])
}

/// Check if a line starts with a bullet or number marker
pub fn is_list_line(line: &str) -> bool {
    LIST_MARKER.is_match(line)
}
