//! `[collections.*]` section configuration.
//!
//! A collection groups content files matching a path pattern and exposes
//! them, sorted, to templates and to the pagination/archive/tags stages.
//!
//! # Example
//!
//! ```toml
//! [collections.articles]
//! pattern = "articles/**/*.md"
//! sort_by = "date"
//! reverse = true
//! ```

use crate::config::error::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One named collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Path pattern relative to the content directory. `*` matches within
    /// a segment, `**` matches across segments.
    pub pattern: String,

    /// Front matter field to sort by.
    pub sort_by: String,

    /// Sort newest first.
    pub reverse: bool,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            sort_by: "date".into(),
            reverse: true,
        }
    }
}

/// The default collection set: blog articles.
pub fn default_collections() -> BTreeMap<String, CollectionConfig> {
    let mut map = BTreeMap::new();
    map.insert(
        "articles".to_string(),
        CollectionConfig {
            pattern: "articles/**/*.md".into(),
            ..Default::default()
        },
    );
    map
}

/// Validate every configured collection.
pub fn validate_collections(
    collections: &BTreeMap<String, CollectionConfig>,
    diag: &mut ConfigDiagnostics,
) {
    for (name, collection) in collections {
        if collection.pattern.is_empty() {
            // FieldPath wants 'static, so the dynamic key goes in the message
            diag.error_with_hint(
                FieldPath::new("collections"),
                format!("collection '{name}' has an empty pattern"),
                "e.g.: pattern = \"articles/**/*.md\"",
            );
        }
        if collection.sort_by.is_empty() {
            diag.error(
                FieldPath::new("collections"),
                format!("collection '{name}' has an empty sort_by field"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_default_collections() {
        let collections = default_collections();
        let articles = collections.get("articles").unwrap();
        assert_eq!(articles.pattern, "articles/**/*.md");
        assert_eq!(articles.sort_by, "date");
        assert!(articles.reverse);
    }

    #[test]
    fn test_collections_parse() {
        let config = test_parse_config(
            "[collections.notes]\npattern = \"notes/*.md\"\nreverse = false",
        );
        let notes = config.collections.get("notes").unwrap();
        assert_eq!(notes.pattern, "notes/*.md");
        assert_eq!(notes.sort_by, "date");
        assert!(!notes.reverse);
    }

    #[test]
    fn test_collections_validate_empty_pattern() {
        let mut collections = BTreeMap::new();
        collections.insert("broken".to_string(), CollectionConfig::default());

        let mut diag = ConfigDiagnostics::new();
        validate_collections(&collections, &mut diag);
        assert!(diag.has_errors());
    }
}
