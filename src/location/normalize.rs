//! Place-name normalization.
//!
//! Every comparison in the matcher runs on normalized text, so this has to
//! be stable: applying it twice gives the same result as applying it once.

/// Canonicalize a raw place name for comparison.
///
/// Lower-cases, drops every character that is not a letter, digit or
/// whitespace, and collapses whitespace runs into single spaces with no
/// leading or trailing space. Blank input yields `""`, which callers treat
/// as "no input".
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
