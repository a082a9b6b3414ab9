//! Pagination stage: split the articles collection into index pages.

use anyhow::Result;
use serde_json::{Value, json};

use super::{BuildContext, Plugin, url_for_key};
use crate::config::{PaginationConfig, cfg};
use crate::page::{FileMap, PageFile, PageMeta};

pub struct Paginator;

impl Plugin for Paginator {
    fn name(&self) -> &'static str {
        "pagination"
    }

    fn run(&self, files: &mut FileMap, ctx: &mut BuildContext) -> Result<()> {
        let config = cfg();
        paginate(files, ctx, &config.pagination)
    }
}

/// Generate index pages from the configured collection.
///
/// The first page lands at `config.first`, later pages at `config.path`
/// with `:num` replaced by the 1-based page number. Every page carries a
/// `pagination` object for its template: page number, total page count,
/// its entries, and previous/next page URLs.
pub fn paginate(
    files: &mut FileMap,
    ctx: &mut BuildContext,
    config: &PaginationConfig,
) -> Result<()> {
    let entries = ctx.collection_pages(&config.collection, files);

    let total = entries.len().div_ceil(config.per_page).max(1);
    let keys: Vec<String> = (1..=total).map(|num| page_key(config, num)).collect();

    for (index, chunk_keys) in keys.iter().enumerate() {
        let num = index + 1;
        let start = index * config.per_page;
        let end = (start + config.per_page).min(entries.len());
        let page_entries: Vec<Value> = entries[start..end].to_vec();

        let previous = (num > 1).then(|| url_for_key(&keys[index - 1]));
        let next = keys.get(num).map(|key| url_for_key(key));

        let mut meta = PageMeta {
            title: Some(config.title.clone()),
            layout: Some(config.template.clone()),
            ..Default::default()
        };
        meta.extra.insert(
            "pagination".to_string(),
            json!({
                "num": num,
                "pages": total,
                "entries": page_entries,
                "previous": previous,
                "next": next,
            }),
        );

        files.insert(chunk_keys.clone(), PageFile::with_meta(Vec::new(), meta));
    }

    Ok(())
}

fn page_key(config: &PaginationConfig, num: usize) -> String {
    if num == 1 {
        config.first.clone()
    } else {
        config.path.replace(":num", &num.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, date: &str) -> PageFile {
        PageFile::with_meta(
            Vec::new(),
            PageMeta {
                title: Some(title.into()),
                date: Some(date.into()),
                ..Default::default()
            },
        )
    }

    fn setup(count: usize) -> (FileMap, BuildContext) {
        let mut files = FileMap::new();
        let mut members = Vec::new();
        for i in 0..count {
            let key = format!("post-{i}/index.html");
            files.insert(key.clone(), article(&format!("Post {i}"), "2016-01-01"));
            members.push(key);
        }
        let mut ctx = BuildContext::new();
        ctx.collections.insert("articles".into(), members);
        (files, ctx)
    }

    #[test]
    fn test_paginate_splits_pages() {
        let (mut files, mut ctx) = setup(12);
        let config = PaginationConfig::default(); // per_page 5

        paginate(&mut files, &mut ctx, &config).unwrap();

        assert!(files.contains_key("index.html"));
        assert!(files.contains_key("page/2/index.html"));
        assert!(files.contains_key("page/3/index.html"));
        assert!(!files.contains_key("page/4/index.html"));

        let first = &files["index.html"];
        let pagination = &first.meta.extra["pagination"];
        assert_eq!(pagination["num"], 1);
        assert_eq!(pagination["pages"], 3);
        assert_eq!(pagination["entries"].as_array().unwrap().len(), 5);
        assert_eq!(pagination["previous"], Value::Null);
        assert_eq!(pagination["next"], "/page/2/");

        let last = &files["page/3/index.html"];
        let pagination = &last.meta.extra["pagination"];
        assert_eq!(pagination["entries"].as_array().unwrap().len(), 2);
        assert_eq!(pagination["previous"], "/page/2/");
        assert_eq!(pagination["next"], Value::Null);
    }

    #[test]
    fn test_paginate_single_page() {
        let (mut files, mut ctx) = setup(3);
        paginate(&mut files, &mut ctx, &PaginationConfig::default()).unwrap();

        let pagination = &files["index.html"].meta.extra["pagination"];
        assert_eq!(pagination["pages"], 1);
        assert_eq!(pagination["previous"], Value::Null);
        assert_eq!(pagination["next"], Value::Null);
    }

    #[test]
    fn test_paginate_empty_collection_still_emits_index() {
        let (mut files, mut ctx) = setup(0);
        paginate(&mut files, &mut ctx, &PaginationConfig::default()).unwrap();

        let page = &files["index.html"];
        assert_eq!(page.meta.title.as_deref(), Some("Archive"));
        assert_eq!(page.meta.layout.as_deref(), Some("index.html"));
        assert!(
            page.meta.extra["pagination"]["entries"]
                .as_array()
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_paginate_generated_pages_use_template() {
        let (mut files, mut ctx) = setup(1);
        let config = PaginationConfig {
            template: "home.html".into(),
            title: "Blog".into(),
            ..Default::default()
        };
        paginate(&mut files, &mut ctx, &config).unwrap();

        let page = &files["index.html"];
        assert_eq!(page.meta.layout.as_deref(), Some("home.html"));
        assert_eq!(page.meta.title.as_deref(), Some("Blog"));
    }
}
