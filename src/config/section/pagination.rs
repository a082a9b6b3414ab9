//! `[pagination]` section configuration.
//!
//! Splits the articles collection into index pages.
//!
//! # Example
//!
//! ```toml
//! [pagination]
//! per_page = 5
//! first = "index.html"
//! path = "page/:num/index.html"
//! title = "Archive"
//! template = "index.html"
//! ```

use crate::config::error::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

const PER_PAGE: FieldPath = FieldPath::new("pagination.per_page");
const PATH: FieldPath = FieldPath::new("pagination.path");

/// Pagination settings for the articles index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Collection whose entries are paged.
    pub collection: String,

    /// Entries per page.
    pub per_page: usize,

    /// Output path of the first page.
    pub first: String,

    /// Output path pattern for subsequent pages. `:num` is the 1-based
    /// page number.
    pub path: String,

    /// Title metadata given to generated pages.
    pub title: String,

    /// Template that renders index pages.
    pub template: String,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            collection: "articles".into(),
            per_page: 5,
            first: "index.html".into(),
            path: "page/:num/index.html".into(),
            title: "Archive".into(),
            template: "index.html".into(),
        }
    }
}

impl PaginationConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.per_page == 0 {
            diag.error(PER_PAGE, "must be at least 1");
        }
        if !self.path.contains(":num") {
            diag.error_with_hint(
                PATH,
                "path pattern must contain ':num'",
                "e.g.: \"page/:num/index.html\"",
            );
        }
    }
}
