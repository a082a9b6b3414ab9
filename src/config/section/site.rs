//! `[site]` section configuration.
//!
//! Basic site metadata, exposed to every template as `site.*`.
//!
//! # Example
//!
//! ```toml
//! [site]
//! name = "Adom"
//! description = "Blog about Microsoft technologies"
//! url = "https://example.com"
//! ```

use crate::config::error::{ConfigDiagnostics, FieldPath};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

const URL: FieldPath = FieldPath::new("site.url");

/// Site metadata for template rendering.
///
/// For custom fields, use `[site.extra]` and access via `site.extra.xxx`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site name shown in titles and headers.
    pub name: String,

    /// Site description for meta tags and index headers.
    pub description: String,

    /// Author name.
    pub author: String,

    /// Site URL (e.g., "https://example.com").
    pub url: Option<String>,

    /// Link prefix templates prepend to internal links (e.g., "blog/").
    pub prefix_link: String,

    /// Language code (e.g., "en").
    pub language: String,

    /// Custom fields accessible via `site.extra.xxx` in templates.
    pub extra: FxHashMap<String, toml::Value>,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            author: String::new(),
            url: None,
            prefix_link: String::new(),
            language: "en".into(),
            extra: FxHashMap::default(),
        }
    }
}

impl SiteInfoConfig {
    /// Validate site configuration.
    ///
    /// `url` must be a valid http(s) URL with a host when set.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(url_str) = &self.url {
            match url::Url::parse(url_str) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            URL,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            URL,
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        URL,
                        format!("invalid URL: {e}"),
                        "use format like https://example.com",
                    );
                }
            }
        }
    }
}
