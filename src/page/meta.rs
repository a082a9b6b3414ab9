//! Page metadata from front matter.

use serde::Deserialize;

use super::JsonMap;

/// Deserialize tags, treating `null` as empty vec
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Deserialize a boolean flag, accepting bools, truthy strings, and `1`.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Str(String),
        Num(i64),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(false),
        Some(Flag::Bool(b)) => Ok(b),
        Some(Flag::Str(s)) => Ok(is_truthy(&s)),
        Some(Flag::Num(n)) => Ok(n == 1),
    }
}

/// A value counts as enabled when it is `true`, `yes`, or `1` (case-insensitive).
pub(crate) fn is_truthy(s: &str) -> bool {
    s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("yes") || s == "1"
}

/// Page metadata from front matter in content files
///
/// # Standard Fields
///
/// | Field              | Type           | Description                        |
/// |--------------------|----------------|------------------------------------|
/// | `title`            | `String`       | Page title                         |
/// | `date`             | `String`       | Publication date                   |
/// | `author`           | `String`       | Author name                        |
/// | `draft`            | `bool`         | Draft status (default: false)      |
/// | `tags`             | `Vec<String>`  | Categorization tags                |
/// | `layout`           | `String`       | Template override                  |
/// | `comments`         | `bool`         | Inject the comment widget          |
/// | `comments-counter` | `bool`         | Inject the comment counter script  |
/// | `excerpt`          | `String`       | Manual excerpt override            |
///
/// # Custom Fields (`extra`)
///
/// Any additional fields are captured in `extra` as raw JSON and exposed
/// to templates as-is.
#[derive(Debug, Clone, Default, serde::Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PageMeta {
    pub title: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    #[serde(deserialize_with = "deserialize_flag")]
    pub draft: bool,
    /// Tags for categorizing the page.
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    /// Template used to render this page (overrides the configured default).
    pub layout: Option<String>,
    /// Inject the comment widget script into this page.
    #[serde(deserialize_with = "deserialize_flag")]
    pub comments: bool,
    /// Inject the comment counter script and rewrite counter links.
    #[serde(deserialize_with = "deserialize_flag")]
    pub comments_counter: bool,
    /// Manual excerpt. When absent, the first paragraph of the rendered
    /// page is used instead.
    pub excerpt: Option<String>,
    /// Additional user-defined fields (raw JSON).
    #[serde(flatten)]
    pub extra: JsonMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_meta_default() {
        let meta = PageMeta::default();
        assert!(meta.title.is_none());
        assert!(!meta.draft);
        assert!(!meta.comments);
        assert!(!meta.comments_counter);
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn test_page_meta_deserialize() {
        let json = r#"{"title": "Hello", "draft": true, "tags": ["rust", "web"]}"#;
        let meta: PageMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert!(meta.draft);
        assert_eq!(meta.tags, vec!["rust", "web"]);
    }

    #[test]
    fn test_page_meta_extra_fields() {
        let json = r#"{"title": "Test", "custom_field": "value", "number": 42}"#;
        let meta: PageMeta = serde_json::from_str(json).unwrap();
        assert_eq!(
            meta.extra.get("custom_field").and_then(|v| v.as_str()),
            Some("value")
        );
        assert_eq!(meta.extra.get("number").and_then(|v| v.as_i64()), Some(42));
    }

    #[test]
    fn test_page_meta_null_tags() {
        let json = r#"{"tags": null}"#;
        let meta: PageMeta = serde_json::from_str(json).unwrap();
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn test_comments_flag_kebab_case() {
        let json = r#"{"comments": true, "comments-counter": true}"#;
        let meta: PageMeta = serde_json::from_str(json).unwrap();
        assert!(meta.comments);
        assert!(meta.comments_counter);
        // Kebab-case field must not leak into extra
        assert!(!meta.extra.contains_key("comments-counter"));
    }

    #[test]
    fn test_flags_accept_truthy_strings() {
        let json = r#"{"comments": "yes", "comments-counter": "1", "draft": "TRUE"}"#;
        let meta: PageMeta = serde_json::from_str(json).unwrap();
        assert!(meta.comments);
        assert!(meta.comments_counter);
        assert!(meta.draft);
    }

    #[test]
    fn test_flags_reject_falsy_strings() {
        let json = r#"{"comments": "no", "comments-counter": "0", "draft": "false"}"#;
        let meta: PageMeta = serde_json::from_str(json).unwrap();
        assert!(!meta.comments);
        assert!(!meta.comments_counter);
        assert!(!meta.draft);
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy("true"));
        assert!(is_truthy("True"));
        assert!(is_truthy("YES"));
        assert!(is_truthy("1"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy("no"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }
}
