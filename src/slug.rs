//! Slug derivation for titled entities.

/// Convert a title to the slug used as a work/project identity.
///
/// - Converts to lowercase
/// - Replaces each run of whitespace with a single hyphen
/// - Drops every character outside `[a-z0-9-]`
///
/// Collisions are not resolved here; stores reject a slug that is already taken.
pub fn derive_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_whitespace = false;

    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;

        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            slug.push(c);
        }
    }

    slug
}

/// A usable identity: only `[a-z0-9-]`, with at least one letter or digit.
pub fn is_valid_slug(slug: &str) -> bool {
    slug.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && slug.chars().any(|c| c.is_ascii_alphanumeric())
}
