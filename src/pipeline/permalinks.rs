//! Permalinks stage: move articles to pretty URLs.
//!
//! Each collection member moves to `<slug>/index.html`, where the slug
//! comes from the `:title` pattern resolved against the page's metadata.
//! Pages without a title stay where they are.

use anyhow::Result;
use serde_json::Value;

use super::{BuildContext, Plugin};
use crate::page::{FileMap, PageMeta};
use crate::utils::slug::slugify;

/// Metadata pattern articles are moved to. `:field` resolves from front
/// matter, then the result is slugified per path segment.
const PATTERN: &str = ":title";

pub struct Permalinks;

impl Plugin for Permalinks {
    fn name(&self) -> &'static str {
        "permalinks"
    }

    fn run(&self, files: &mut FileMap, ctx: &mut BuildContext) -> Result<()> {
        let members: Vec<String> = ctx.collections.values().flatten().cloned().collect();

        for key in members {
            let Some(file) = files.get(&key) else {
                continue;
            };
            let Some(new_key) = permalink_for(&file.meta, PATTERN) else {
                continue;
            };
            if new_key == key {
                continue;
            }

            if let Some(file) = files.remove(&key) {
                files.insert(new_key.clone(), file);
                ctx.rename_key(&key, &new_key);
            }
        }
        Ok(())
    }
}

/// Resolve a `:field` pattern against page metadata.
///
/// Returns `None` when any referenced field is missing or resolves to an
/// empty slug.
pub fn permalink_for(meta: &PageMeta, pattern: &str) -> Option<String> {
    let meta_value = serde_json::to_value(meta).ok()?;

    let mut segments = Vec::new();
    for part in pattern.split('/') {
        let resolved = match part.strip_prefix(':') {
            Some(field) => {
                let raw = field_string(&meta_value, field)?;
                slugify(&raw)
            }
            None => part.to_string(),
        };
        if resolved.is_empty() {
            return None;
        }
        segments.push(resolved);
    }

    Some(format!("{}/index.html", segments.join("/")))
}

fn field_string(meta: &Value, field: &str) -> Option<String> {
    match &meta[field] {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> PageMeta {
        PageMeta {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_permalink_from_title() {
        assert_eq!(
            permalink_for(&titled("Hello World"), ":title"),
            Some("hello-world/index.html".to_string())
        );
    }

    #[test]
    fn test_permalink_slugifies_punctuation() {
        assert_eq!(
            permalink_for(&titled("ASP.NET: Getting Started!"), ":title"),
            Some("asp-net-getting-started/index.html".to_string())
        );
    }

    #[test]
    fn test_permalink_missing_field() {
        assert_eq!(permalink_for(&PageMeta::default(), ":title"), None);
    }

    #[test]
    fn test_permalink_empty_slug() {
        assert_eq!(permalink_for(&titled("???"), ":title"), None);
    }

    #[test]
    fn test_permalink_mixed_pattern() {
        let meta = PageMeta {
            title: Some("My Post".into()),
            date: Some("2016-03-15".into()),
            ..Default::default()
        };
        assert_eq!(
            permalink_for(&meta, "blog/:date/:title"),
            Some("blog/2016-03-15/my-post/index.html".to_string())
        );
    }
}
