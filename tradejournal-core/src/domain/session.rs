//! Trading session labels.
//!
//! Sessions are free-form grouping labels; these are the ones the journal
//! knows by name.

pub const LONDON: &str = "London";
pub const NEW_YORK: &str = "New York";
pub const ASIAN: &str = "Asian";

/// Session assumed for trades that did not record one.
pub const DEFAULT_SESSION: &str = LONDON;

/// Resolve an optional session to its label: trimmed, or the default when blank.
pub fn session_label(raw: Option<&str>) -> &str {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SESSION)
}
