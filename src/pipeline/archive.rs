//! Archive stage: one page per calendar year of articles.

use anyhow::Result;
use serde_json::{Value, json};

use super::{BuildContext, Plugin};
use crate::config::{ArchiveConfig, cfg};
use crate::page::{FileMap, PageFile, PageMeta};
use crate::utils::date::DateTimeUtc;

pub struct YearlyArchive;

impl Plugin for YearlyArchive {
    fn name(&self) -> &'static str {
        "archive"
    }

    fn run(&self, files: &mut FileMap, ctx: &mut BuildContext) -> Result<()> {
        let config = cfg();
        build_archive(files, ctx, &config.archive, &config.pagination.collection)
    }
}

/// Group the collection by year and emit `<path>/<year>/index.html` pages.
///
/// Posts keep their collection order within a year (newest first), and
/// undated posts are left out of the archive entirely.
pub fn build_archive(
    files: &mut FileMap,
    ctx: &mut BuildContext,
    config: &ArchiveConfig,
    collection: &str,
) -> Result<()> {
    let entries = ctx.collection_pages(collection, files);

    // Year → posts, newest year first.
    let mut years: Vec<(u16, Vec<Value>)> = Vec::new();
    for entry in entries {
        let Some(year) = entry["date"]
            .as_str()
            .and_then(DateTimeUtc::parse)
            .map(|dt| dt.year)
        else {
            continue;
        };
        match years.iter_mut().find(|(y, _)| *y == year) {
            Some((_, posts)) => posts.push(entry),
            None => years.push((year, vec![entry])),
        }
    }
    years.sort_by(|a, b| b.0.cmp(&a.0));

    for (year, posts) in years {
        let key = format!("{}/{}/index.html", config.path, year);

        let mut meta = PageMeta {
            title: Some(year.to_string()),
            layout: Some(config.template.clone()),
            ..Default::default()
        };
        meta.extra.insert(
            "archive".to_string(),
            json!({ "year": year, "posts": posts }),
        );

        files.insert(key, PageFile::with_meta(Vec::new(), meta));
    }

    Ok(())
}
