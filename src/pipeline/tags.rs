//! Tags stage: per-tag pages plus the global tag index.
//!
//! Tags are normalized to slugs, so "Windows Azure" and "windows-azure"
//! land on the same page. The first spelling seen (in collection order)
//! provides the display name.

use anyhow::Result;
use serde_json::{Value, json};

use super::{BuildContext, Plugin, TagEntry, url_for_key};
use crate::config::{TagsConfig, cfg};
use crate::page::{FileMap, PageFile, PageMeta};
use crate::utils::slug::slugify;

pub struct TagPages;

impl Plugin for TagPages {
    fn name(&self) -> &'static str {
        "tags"
    }

    fn run(&self, files: &mut FileMap, ctx: &mut BuildContext) -> Result<()> {
        let config = cfg();
        build_tag_pages(files, ctx, &config.tags, &config.pagination.collection)
    }
}

/// Emit `<path>/<slug>.html` for every tag and record the tag index.
pub fn build_tag_pages(
    files: &mut FileMap,
    ctx: &mut BuildContext,
    config: &TagsConfig,
    collection: &str,
) -> Result<()> {
    let entries = ctx.collection_pages(collection, files);

    // slug → (display name, posts), insertion-ordered by first appearance
    let mut tags: Vec<(String, String, Vec<Value>)> = Vec::new();
    for entry in &entries {
        let Some(post_tags) = entry["tags"].as_array() else {
            continue;
        };
        for tag in post_tags {
            let Some(name) = tag.as_str() else {
                continue;
            };
            let slug = slugify(name);
            if slug.is_empty() {
                continue;
            }
            match tags.iter_mut().find(|(s, _, _)| *s == slug) {
                Some((_, _, posts)) => posts.push(entry.clone()),
                None => tags.push((slug, name.to_string(), vec![entry.clone()])),
            }
        }
    }

    let mut index = Vec::with_capacity(tags.len());
    for (slug, name, posts) in tags {
        let key = format!("{}/{}.html", config.path, slug);
        let count = posts.len();

        let mut meta = PageMeta {
            title: Some(name.clone()),
            layout: Some(config.template.clone()),
            ..Default::default()
        };
        meta.extra.insert(
            "tag".to_string(),
            json!({ "name": name.clone(), "slug": slug.clone(), "posts": posts }),
        );

        index.push(TagEntry {
            name,
            url: url_for_key(&key),
            slug,
            count,
        });

        files.insert(key, PageFile::with_meta(Vec::new(), meta));
    }

    index.sort_by(|a, b| a.name.cmp(&b.name));
    ctx.tag_index = index;
    Ok(())
}
