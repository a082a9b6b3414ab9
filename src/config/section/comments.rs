//! `[comments]` section configuration.
//!
//! Options for the Commento widget injector. Pages opt in per file with
//! `comments: true` and `comments-counter: true` front matter flags.
//!
//! # Example
//!
//! ```toml
//! [comments]
//! css_override = "https://example.com/commento.css"
//! auto_init = false
//! id_root = "comments-box"
//! counter_selector = ".comment-count"
//! ```

use serde::{Deserialize, Serialize};

/// Commento injection options.
///
/// Values are taken as-is; absent keys fall back to the widget defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// Stylesheet URL the widget loads instead of its built-in CSS.
    pub css_override: Option<String>,

    /// Initialize the widget on page load. When false the page has to
    /// call `window.commento.main()` itself.
    pub auto_init: bool,

    /// Root element id the widget mounts into, when it differs from the
    /// widget default ("commento").
    pub id_root: String,

    /// CSS selector for anchors that show a comment count.
    pub counter_selector: String,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            css_override: None,
            auto_init: true,
            id_root: "commento".into(),
            counter_selector: ".commento-counter".into(),
        }
    }
}
