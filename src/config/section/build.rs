//! `[build]` section configuration.
//!
//! Directory layout and output handling.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "content"
//! layouts = "layouts"
//! output = "public"
//!
//! [build.assets]
//! source = "layouts/assets"
//! dest = "assets"
//! ```

use crate::config::error::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_LAYOUT: FieldPath = FieldPath::new("build.default_layout");
const ASSETS_DEST: FieldPath = FieldPath::new("build.assets.dest");
const OUTPUT: FieldPath = FieldPath::new("build.output");

/// Build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Content directory with markdown sources.
    pub content: PathBuf,

    /// Template directory.
    pub layouts: PathBuf,

    /// Output directory for the generated site.
    pub output: PathBuf,

    /// Static asset tree copied into the output.
    pub assets: AssetsConfig,

    /// Template used when a page has no `layout` field.
    pub default_layout: String,

    /// Remove the output directory before building (set from CLI).
    #[serde(skip)]
    pub clean: bool,

    /// Keep pages marked `draft: true` (set from CLI; always on for serve).
    #[serde(skip)]
    pub include_drafts: bool,
}

/// Static assets copied alongside generated pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Source directory, relative to the project root.
    pub source: PathBuf,

    /// Destination prefix inside the output directory.
    pub dest: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content: PathBuf::from("content"),
            layouts: PathBuf::from("layouts"),
            output: PathBuf::from("public"),
            assets: AssetsConfig::default(),
            default_layout: "article.html".into(),
            clean: false,
            include_drafts: false,
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("layouts/assets"),
            dest: "assets".into(),
        }
    }
}

impl BuildConfig {
    /// Normalize directories against the project root.
    ///
    /// `assets.dest` stays relative: it is an output path prefix, not a
    /// file system location.
    pub fn normalize(&mut self, root: &Path) {
        self.content = crate::utils::path::normalize_path(&root.join(&self.content));
        self.layouts = crate::utils::path::normalize_path(&root.join(&self.layouts));
        self.output = crate::utils::path::normalize_path(&root.join(&self.output));
        self.assets.source = crate::utils::path::normalize_path(&root.join(&self.assets.source));
    }

    /// Validate build configuration.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.default_layout.is_empty() {
            diag.error_with_hint(
                DEFAULT_LAYOUT,
                "default layout must not be empty",
                "e.g.: \"article.html\"",
            );
        }

        if Path::new(&self.assets.dest).is_absolute() {
            diag.error_with_hint(
                ASSETS_DEST,
                "asset destination must be relative to the output directory",
                "e.g.: \"assets\"",
            );
        }

        // Writing output into the content tree would feed generated pages
        // back into the next build.
        if self.output == self.content {
            diag.error(OUTPUT, "output directory must differ from content directory");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_build_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.content, PathBuf::from("content"));
        assert_eq!(config.build.layouts, PathBuf::from("layouts"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.build.assets.dest, "assets");
        assert_eq!(config.build.default_layout, "article.html");
        assert!(!config.build.clean);
        assert!(!config.build.include_drafts);
    }

    #[test]
    fn test_build_parse() {
        let config = test_parse_config(
            "[build]\ncontent = \"src\"\noutput = \"docs\"\n[build.assets]\nsource = \"theme/static\"\ndest = \"static\"",
        );
        assert_eq!(config.build.content, PathBuf::from("src"));
        assert_eq!(config.build.output, PathBuf::from("docs"));
        assert_eq!(config.build.assets.source, PathBuf::from("theme/static"));
        assert_eq!(config.build.assets.dest, "static");
    }

    #[test]
    fn test_build_validate() {
        let mut diag = ConfigDiagnostics::new();
        BuildConfig::default().validate(&mut diag);
        assert!(diag.is_empty());

        let mut diag = ConfigDiagnostics::new();
        let build = BuildConfig {
            default_layout: String::new(),
            ..Default::default()
        };
        build.validate(&mut diag);
        assert!(diag.has_errors());

        let mut diag = ConfigDiagnostics::new();
        let build = BuildConfig {
            output: PathBuf::from("content"),
            ..Default::default()
        };
        build.validate(&mut diag);
        assert!(diag.has_errors());
    }
}
