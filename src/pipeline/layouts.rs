//! Layouts stage: render every HTML page through its Tera template.

use anyhow::{Context as _, Result};
use serde_json::Value;

use super::{BuildContext, Plugin, page_ref};
use crate::config::{SiteConfig, cfg};
use crate::page::FileMap;
use crate::template::TemplateEngine;

pub struct LayoutRenderer;

impl Plugin for LayoutRenderer {
    fn name(&self) -> &'static str {
        "layouts"
    }

    fn run(&self, files: &mut FileMap, ctx: &mut BuildContext) -> Result<()> {
        let config = cfg();
        let engine = TemplateEngine::from_dir(&config.build.layouts)?;
        render_all(files, ctx, &engine, &config)
    }
}

/// Render each `.html` entry through `meta.layout` (or the configured
/// default), replacing its contents with the rendered page.
///
/// Every template sees `site`, `collections`, the tag index under the
/// configured metadata key, plus the per-page `page` object and raw
/// `contents`.
pub fn render_all(
    files: &mut FileMap,
    ctx: &BuildContext,
    engine: &TemplateEngine,
    config: &SiteConfig,
) -> Result<()> {
    let mut base = tera::Context::new();
    base.insert("site", &config.site);

    let collections: Value = ctx
        .collections
        .keys()
        .map(|name| (name.clone(), Value::Array(ctx.collection_pages(name, files))))
        .collect::<serde_json::Map<_, _>>()
        .into();
    base.insert("collections", &collections);
    base.insert(&config.tags.metadata_key, &ctx.tag_index);

    let keys: Vec<String> = files
        .keys()
        .filter(|key| key.ends_with(".html"))
        .cloned()
        .collect();

    for key in keys {
        let rendered = {
            let file = &files[&key];
            let template = file
                .meta
                .layout
                .as_deref()
                .unwrap_or(&config.build.default_layout);

            let mut context = base.clone();
            context.insert("page", &page_ref(&key, file));
            context.insert("contents", file.contents_str()?);

            engine
                .render(template, &context)
                .with_context(|| format!("failed to render '{key}'"))?
        };

        if let Some(file) = files.get_mut(&key) {
            file.set_contents(rendered);
        }
    }

    Ok(())
}
