//! `[tags]` section configuration.
//!
//! Tag pages generated from article `tags` front matter.

use crate::config::error::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

const PATH: FieldPath = FieldPath::new("tags.path");
const METADATA_KEY: FieldPath = FieldPath::new("tags.metadata_key");

/// Tag page settings. Pages land at `<path>/<tag-slug>.html`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TagsConfig {
    /// Output directory prefix for tag pages.
    pub path: String,

    /// Template that renders a tag page.
    pub template: String,

    /// Template context key the full tag index is exposed under.
    pub metadata_key: String,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            path: "topics".into(),
            template: "tag.html".into(),
            metadata_key: "category".into(),
        }
    }
}

impl TagsConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.path.is_empty() {
            diag.error_with_hint(PATH, "must not be empty", "e.g.: \"topics\"");
        }
        if self.metadata_key.is_empty() {
            diag.error(METADATA_KEY, "must not be empty");
        }
    }
}
