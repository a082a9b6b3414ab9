//! `[markdown]` section configuration.
//!
//! Extension switches for the markdown converter.

use pulldown_cmark::Options;
use serde::{Deserialize, Serialize};

/// Markdown conversion settings. All extensions default to enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
    /// Enable heading attributes extension (e.g., `# Heading {#custom-id}`)
    pub heading_attributes: bool,
    /// Syntax highlight fenced code blocks
    pub highlight: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            heading_attributes: true,
            highlight: true,
        }
    }
}

impl MarkdownConfig {
    /// Convert to pulldown-cmark Options
    pub fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        if self.heading_attributes {
            opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_markdown_defaults() {
        let config = test_parse_config("");
        assert!(config.markdown.tables);
        assert!(config.markdown.footnotes);
        assert!(config.markdown.highlight);
    }

    #[test]
    fn test_markdown_disable_extension() {
        let config = test_parse_config("[markdown]\ntables = false\nhighlight = false");
        assert!(!config.markdown.tables);
        assert!(!config.markdown.highlight);
        assert!(config.markdown.footnotes);
    }

    #[test]
    fn test_to_pulldown_options() {
        let opts = MarkdownConfig::default().to_pulldown_options();
        assert!(opts.contains(Options::ENABLE_TABLES));
        assert!(opts.contains(Options::ENABLE_FOOTNOTES));

        let config = MarkdownConfig {
            tables: false,
            ..Default::default()
        };
        let opts = config.to_pulldown_options();
        assert!(!opts.contains(Options::ENABLE_TABLES));
        assert!(opts.contains(Options::ENABLE_STRIKETHROUGH));
    }
}
