//! Comma-separated header value merging.
//!
//! Used when a header is already present on the response and the
//! configuration asks for append semantics. Tokens are compared exactly
//! (case-sensitive, no normalization inside a token) and emitted in
//! first-seen order: existing tokens first, then new ones.

use std::collections::HashSet;

/// Split a comma-separated header value into tokens.
///
/// Whitespace around each comma is dropped and empty tokens are skipped.
///
/// # Example
///
/// ```rust
/// use corsheaders::middleware::cors::split_tokens;
///
/// let tokens: Vec<&str> = split_tokens("GET , POST,,PUT").collect();
/// assert_eq!(tokens, vec!["GET", "POST", "PUT"]);
/// ```
pub fn split_tokens(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// Merge existing header values with a new comma-separated value.
///
/// Every existing value is split the same way as `new_value`; duplicates are
/// removed and the union is joined with `,`.
///
/// # Example
///
/// ```rust
/// use corsheaders::middleware::cors::merge_header_values;
///
/// let merged = merge_header_values(["A,B"], "B, C");
/// assert_eq!(merged, "A,B,C");
/// ```
pub fn merge_header_values<'a, I>(existing: I, new_value: &'a str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut ordered: Vec<&str> = Vec::new();

    let existing_tokens = existing.into_iter().flat_map(split_tokens);
    for token in existing_tokens.chain(split_tokens(new_value)) {
        if seen.insert(token) {
            ordered.push(token);
        }
    }

    ordered.join(",")
}
