//! Comments stage: Commento widget and counter injection.
//!
//! Pages opt in through front matter: `comments: true` appends the widget
//! loader to `<body>`, `comments-counter: true` appends the counter loader
//! and rewrites counter-anchor `href`s with a `#commento` fragment. Files
//! with neither flag are never parsed and stay byte-identical.
//!
//! The rewrite is a single streaming pass per flagged file; both flags
//! share it when set together, with the widget handler registered first so
//! its script tag always lands before the counter's. Text outside the
//! rewritten regions passes through verbatim, entities included.
//!
//! Injection is not idempotent: a second pass over its own output appends
//! duplicate script tags and a second `#commento` fragment. Builds are
//! single-pass, so no deduplication is attempted.

use std::borrow::Cow;

use anyhow::{Context as _, Result, anyhow};
use crossbeam::channel::{Receiver, bounded};
use lol_html::html_content::{ContentType, Element};
use lol_html::{ElementContentHandlers, RewriteStrSettings, Selector, element, rewrite_str};

use super::{BuildContext, Plugin};
use crate::config::{CommentsConfig, cfg};
use crate::page::FileMap;
use crate::utils::html::escape_attr;

/// Widget loader the `comments` flag appends to `<body>`.
pub const WIDGET_URL: &str = "https://cdn.commento.io/js/commento.js";

/// Counter loader the `comments-counter` flag appends to `<body>`.
pub const COUNTER_URL: &str = "https://cdn.commento.io/js/count.js";

/// `data-id-root` is only emitted when the option differs from this.
const DEFAULT_ID_ROOT: &str = "commento";

pub struct CommentsInjector;

impl Plugin for CommentsInjector {
    fn name(&self) -> &'static str {
        "comments"
    }

    fn run(&self, files: &mut FileMap, _ctx: &mut BuildContext) -> Result<()> {
        let config = cfg();
        let completion = inject_all(files, &config.comments)?;
        completion.wait()
    }
}

/// Resolves once, after the injector's synchronous pass has finished.
pub struct Completion {
    rx: Receiver<()>,
}

impl Completion {
    /// Block until completion is signaled.
    pub fn wait(self) -> Result<()> {
        self.rx
            .recv()
            .context("comment injector dropped without signaling completion")
    }
}

/// Process every flagged file in place, then signal completion exactly
/// once through the returned handle.
///
/// A parse or serialize failure aborts the whole pass; there is no
/// per-file recovery, and no completion is signaled for a failed pass.
pub fn inject_all(files: &mut FileMap, options: &CommentsConfig) -> Result<Completion> {
    let (tx, rx) = bounded(1);

    for (key, file) in files.iter_mut() {
        let comments = file.meta.comments;
        let counter = file.meta.comments_counter;
        if !comments && !counter {
            continue;
        }

        let html = file
            .contents_str()
            .with_context(|| format!("'{key}' has comment flags but is not HTML text"))?;
        let rewritten = inject(html, comments, counter, options)
            .with_context(|| format!("failed to inject comment widget into '{key}'"))?;
        file.set_contents(rewritten);
    }

    let _ = tx.send(());
    Ok(Completion { rx })
}

/// Rewrite one page. The handler set is built from the flags, so the
/// document is parsed exactly once however many steps apply.
pub fn inject(
    html: &str,
    comments: bool,
    counter: bool,
    options: &CommentsConfig,
) -> Result<String> {
    let mut handlers: Vec<(Cow<'_, Selector>, ElementContentHandlers<'_>)> = Vec::new();

    if comments {
        let tag = widget_tag(options);
        handlers.push(element!("body", move |el| {
            el.append(&tag, ContentType::Html);
            Ok(())
        }));
    }

    if counter {
        handlers.push(element!("body", |el| {
            el.append(
                &format!("<script defer src=\"{COUNTER_URL}\"></script>"),
                ContentType::Html,
            );
            Ok(())
        }));

        let selector: Selector = options.counter_selector.parse().map_err(|e| {
            anyhow!(
                "invalid counter selector '{}': {}",
                options.counter_selector,
                e
            )
        })?;
        handlers.push((
            Cow::Owned(selector),
            ElementContentHandlers::default().element(|el: &mut Element| {
                // Anchors without an href are left alone
                if let Some(href) = el.get_attribute("href") {
                    el.set_attribute("href", &format!("{href}#commento"))?;
                }
                Ok(())
            }),
        ));
    }

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: handlers,
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|e| anyhow!("HTML rewrite failed: {e}"))
}

/// The widget loader script tag with its conditional data attributes.
fn widget_tag(options: &CommentsConfig) -> String {
    let mut attrs = Vec::new();

    if let Some(css) = &options.css_override {
        attrs.push(format!("data-css-override=\"{}\"", escape_attr(css)));
    }
    if !options.auto_init {
        attrs.push("data-auto-init=\"false\"".to_string());
    }
    if !options.id_root.is_empty() && options.id_root != DEFAULT_ID_ROOT {
        attrs.push(format!("data-id-root=\"{}\"", escape_attr(&options.id_root)));
    }

    format!(
        "<script defer src=\"{WIDGET_URL}\" {}></script>",
        attrs.join(" ")
    )
}
