//! Slug generation and validation.
//!
//! Slugs are derived from document titles and form the document's URL
//! path segment, so they must stay URL-safe: lowercase ASCII alphanumerics
//! separated by single hyphens.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static SLUG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is a valid regex")
});

/// Convert text into a URL-safe slug of at most `max_len` bytes.
///
/// Transforms to lowercase, replaces non-alphanumeric characters with hyphens,
/// collapses consecutive hyphens, and trims leading/trailing hyphens.
pub fn slugify(text: &str, max_len: usize) -> String {
    let slug: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();

    let mut result = String::with_capacity(slug.len());
    let mut prev_was_hyphen = true; // skips leading hyphens
    for c in slug.chars() {
        if c == '-' {
            if !prev_was_hyphen {
                result.push('-');
            }
            prev_was_hyphen = true;
        } else {
            result.push(c);
            prev_was_hyphen = false;
        }
    }

    while result.ends_with('-') {
        result.pop();
    }

    if result.len() > max_len {
        // Pure ASCII at this point, so any index is a char boundary.
        let truncated = &result[..max_len];
        // Prefer a clean break between words.
        if let Some(last_hyphen) = truncated.rfind('-') {
            return truncated[..last_hyphen].to_string();
        }
        return truncated.trim_end_matches('-').to_string();
    }

    result
}

/// Check whether a string is a well-formed slug.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_PATTERN.is_match(slug)
}
