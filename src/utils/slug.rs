//! URL slug generation for permalinks and tag pages.
//!
//! Slugs are lowercase ASCII with `-` separators, safe to place in a URL
//! path segment without percent-encoding. Unicode is transliterated via
//! `deunicode` so "Déjà Vu" and "deja vu" land on the same page.

use deunicode::deunicode;

/// Slugify a title or tag name.
///
/// - transliterate Unicode to ASCII
/// - lowercase
/// - every run of non-alphanumeric characters becomes a single `-`
/// - no leading/trailing `-`
pub fn slugify(input: &str) -> String {
    let ascii = deunicode(input);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("ASP.NET Core"), "asp-net-core");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("a  --  b"), "a-b");
        assert_eq!(slugify("  trimmed  "), "trimmed");
        assert_eq!(slugify("c# & f#"), "c-f");
    }

    #[test]
    fn test_slugify_unicode() {
        assert_eq!(slugify("Déjà Vu"), "deja-vu");
        assert_eq!(slugify("日本語"), "ri-ben-yu");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
