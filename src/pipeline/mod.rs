//! The build pipeline.
//!
//! A build is a sequence of stages run over a shared [`FileMap`]. Each
//! stage mutates the map in place (convert, move, add, or remove entries)
//! and may record shared results in the [`BuildContext`]. Stages run
//! strictly in order; the first error aborts the build.
//!
//! Pipeline order:
//!
//! | # | Stage         | Effect                                        |
//! |---|---------------|-----------------------------------------------|
//! | 1 | `drafts`      | Drop `draft: true` pages                      |
//! | 2 | `collections` | Group + sort pages matching patterns          |
//! | 3 | `markdown`    | `.md` → `.html` via pulldown-cmark + syntect  |
//! | 4 | `excerpts`    | First paragraph → `meta.excerpt`              |
//! | 5 | `permalinks`  | Articles → `<slug>/index.html`                |
//! | 6 | `pagination`  | Articles index + `page/<n>/` pages            |
//! | 7 | `archive`     | Yearly pages under `archives/<year>/`         |
//! | 8 | `tags`        | Tag pages + global tag index                  |
//! | 9 | `layouts`     | Render pages through Tera templates           |
//! | 10| `comments`    | Commento widget/counter injection             |
//! | 11| `assets`      | Copy the static asset tree into the map       |

pub mod archive;
pub mod assets;
pub mod collections;
pub mod comments;
pub mod drafts;
pub mod excerpts;
pub mod layouts;
pub mod markdown;
pub mod pagination;
pub mod permalinks;
pub mod read;
pub mod tags;
pub mod write;

use std::collections::BTreeMap;

use anyhow::{Context as _, Result};
use serde::Serialize;
use serde_json::Value;

use crate::debug;
use crate::page::{FileMap, PageFile};

/// One pipeline stage.
pub trait Plugin {
    fn name(&self) -> &'static str;

    fn run(&self, files: &mut FileMap, ctx: &mut BuildContext) -> Result<()>;
}

/// Shared results passed from stage to stage.
#[derive(Debug, Default)]
pub struct BuildContext {
    /// Collection name → member keys, in sorted order.
    pub collections: BTreeMap<String, Vec<String>>,

    /// Tag index built by the tags stage, exposed to every template.
    pub tag_index: Vec<TagEntry>,

    /// Pages dropped by the drafts stage.
    pub drafts_skipped: usize,
}

/// One tag in the global tag index.
#[derive(Debug, Clone, Serialize)]
pub struct TagEntry {
    pub name: String,
    pub slug: String,
    pub url: String,
    pub count: usize,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a file moved to a new key, keeping collection
    /// membership (and its order) intact.
    pub fn rename_key(&mut self, old: &str, new: &str) {
        for members in self.collections.values_mut() {
            for key in members.iter_mut() {
                if key == old {
                    *key = new.to_string();
                }
            }
        }
    }

    /// Template-facing page objects for a collection, in collection order.
    ///
    /// Members whose file no longer exists (dropped by a later stage) are
    /// skipped rather than rendered as holes.
    pub fn collection_pages(&self, name: &str, files: &FileMap) -> Vec<Value> {
        let Some(members) = self.collections.get(name) else {
            return Vec::new();
        };
        members
            .iter()
            .filter_map(|key| files.get(key).map(|file| page_ref(key, file)))
            .collect()
    }
}

/// The full stage sequence for a build.
pub fn stages() -> Vec<Box<dyn Plugin>> {
    vec![
        Box::new(drafts::DraftFilter),
        Box::new(collections::Collector),
        Box::new(markdown::MarkdownConverter),
        Box::new(excerpts::ExcerptExtractor),
        Box::new(permalinks::Permalinks),
        Box::new(pagination::Paginator),
        Box::new(archive::YearlyArchive),
        Box::new(tags::TagPages),
        Box::new(layouts::LayoutRenderer),
        Box::new(comments::CommentsInjector),
        Box::new(assets::AssetCopier),
    ]
}

/// Run every stage over the file map.
pub fn run(files: &mut FileMap) -> Result<BuildContext> {
    let mut ctx = BuildContext::new();
    for stage in stages() {
        debug!("build"; "stage: {}", stage.name());
        stage
            .run(files, &mut ctx)
            .with_context(|| format!("pipeline stage '{}' failed", stage.name()))?;
    }
    Ok(ctx)
}

/// Browser URL for a file map key.
///
/// `index.html` entries collapse to their directory URL.
pub fn url_for_key(key: &str) -> String {
    if key == "index.html" {
        return "/".to_string();
    }
    if let Some(dir) = key.strip_suffix("/index.html") {
        return format!("/{dir}/");
    }
    format!("/{key}")
}

/// Serialize a page into the object templates see in collection lists.
///
/// All metadata fields (including flattened custom ones) plus `url` and
/// `path`.
pub fn page_ref(key: &str, file: &PageFile) -> Value {
    let mut value = serde_json::to_value(&file.meta).unwrap_or_else(|_| Value::Object(Default::default()));
    if let Value::Object(map) = &mut value {
        map.insert("url".to_string(), Value::String(url_for_key(key)));
        map.insert("path".to_string(), Value::String(key.to_string()));
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageMeta;

    #[test]
    fn test_url_for_key() {
        assert_eq!(url_for_key("index.html"), "/");
        assert_eq!(url_for_key("hello-world/index.html"), "/hello-world/");
        assert_eq!(url_for_key("page/2/index.html"), "/page/2/");
        assert_eq!(url_for_key("topics/azure.html"), "/topics/azure.html");
    }

    #[test]
    fn test_page_ref_includes_url_and_meta() {
        let meta = PageMeta {
            title: Some("Hello".into()),
            ..Default::default()
        };
        let file = PageFile::with_meta(b"body".to_vec(), meta);
        let value = page_ref("hello/index.html", &file);

        assert_eq!(value["title"], "Hello");
        assert_eq!(value["url"], "/hello/");
        assert_eq!(value["path"], "hello/index.html");
    }

    #[test]
    fn test_rename_key_updates_collections() {
        let mut ctx = BuildContext::new();
        ctx.collections
            .insert("articles".into(), vec!["articles/a.md".into(), "articles/b.md".into()]);

        ctx.rename_key("articles/a.md", "articles/a.html");

        assert_eq!(
            ctx.collections["articles"],
            vec!["articles/a.html".to_string(), "articles/b.md".to_string()]
        );
    }

    #[test]
    fn test_collection_pages_skips_missing_files() {
        let mut ctx = BuildContext::new();
        ctx.collections
            .insert("articles".into(), vec!["gone.html".into(), "here.html".into()]);

        let mut files = FileMap::new();
        files.insert("here.html".into(), PageFile::new(b"x".to_vec()));

        let pages = ctx.collection_pages("articles", &files);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0]["path"], "here.html");
    }
}
