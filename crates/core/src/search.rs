//! Listing and search helpers shared by the repository layer and the
//! in-memory store.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of rows returned by browse endpoints.
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Maximum number of rows a single browse request may return.
pub const MAX_LIST_LIMIT: i64 = 500;

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Term helpers
// ---------------------------------------------------------------------------

/// Trim a free-text filter value, treating blank input as "no filter".
pub fn normalize_term(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Escape `%`, `_` and `\` so user input is matched literally by `ILIKE`.
///
/// The resulting pattern must be used with `ESCAPE '\'`.
///
/// # Examples
///
/// ```
/// use petcare_core::search::escape_like;
/// assert_eq!(escape_like("ma"), "ma");
/// assert_eq!(escape_like("100%_dog"), "100\\%\\_dog");
/// ```
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build a `%term%` substring pattern for `ILIKE ... ESCAPE '\'`.
pub fn substring_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

/// Case-insensitive substring test used by the in-memory store in place of
/// [`substring_pattern`] under `ILIKE`.
///
/// Agrees with `ILIKE` on ASCII. Beyond ASCII this folds with Rust's full
/// Unicode `to_lowercase`, while PostgreSQL folds per the database collation,
/// so the two stores can disagree on names such as `"STRASSE"` vs `"straße"`
/// or on characters the collation does not case-map.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
