//! `[archive]` section configuration.
//!
//! Yearly archive pages generated from the articles collection.

use crate::config::error::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

const PATH: FieldPath = FieldPath::new("archive.path");

/// Yearly archive settings. Pages land at `<path>/<year>/index.html`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Output directory prefix for archive pages.
    pub path: String,

    /// Template that renders a year page.
    pub template: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            path: "archives".into(),
            template: "archive.html".into(),
        }
    }
}

impl ArchiveConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.path.is_empty() {
            diag.error_with_hint(PATH, "must not be empty", "e.g.: \"archives\"");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_archive_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.archive.path, "archives");
        assert_eq!(config.archive.template, "archive.html");
    }

    #[test]
    fn test_archive_validate_empty_path() {
        let mut diag = ConfigDiagnostics::new();
        let archive = ArchiveConfig {
            path: String::new(),
            ..Default::default()
        };
        archive.validate(&mut diag);
        assert!(diag.has_errors());
    }
}
