//! Title sanitizing for file and directory names

/// Turns a page title into a filesystem-safe token
///
/// The title is lowercased, every run of characters outside `[a-z0-9]`
/// becomes a single `_`, and leading/trailing underscores are removed.
/// Distinct titles may collide (`"A-B"` and `"a b"` both give `a_b`); that is
/// not detected.
///
/// # Example
///
/// ```
/// use wikidown::sanitize;
///
/// assert_eq!(sanitize("Parent Page"), "parent_page");
/// assert_eq!(sanitize("  Q&A: Release 2.0!  "), "q_a_release_2_0");
/// ```
pub fn sanitize(title: &str) -> String {
    let mut name = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !name.is_empty() {
                name.push('_');
            }
            pending_separator = false;
            name.push(c);
        } else {
            pending_separator = true;
        }
    }

    name
}

/// Sanitized title with a `.md` suffix
pub fn sanitize_filename(title: &str) -> String {
    format!("{}.md", sanitize(title))
}
