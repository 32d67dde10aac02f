//! HTML output helpers shared by the block and inline renderers.

/// HTML-escape a string for safe output.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Escape span text and turn newlines into hard breaks.
pub fn render_text(text: &str) -> String {
    html_escape(text).replace('\n', "<br/>")
}

/// Check that a link target uses a safe scheme.
///
/// Relative URLs and fragments are allowed, as are `http`, `https`,
/// `mailto` and `tel`. Anything else (e.g. `javascript:`) is rejected.
pub fn is_safe_url(url: &str) -> bool {
    let trimmed = url.trim();
    let Some(colon) = trimmed.find(':') else {
        return true;
    };

    // A colon after a path, query or fragment delimiter is not a scheme.
    let scheme = &trimmed[..colon];
    if scheme.contains(['/', '?', '#']) {
        return true;
    }

    matches!(
        scheme.to_ascii_lowercase().as_str(),
        "http" | "https" | "mailto" | "tel"
    )
}
