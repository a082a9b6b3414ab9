//! Excerpts stage: first paragraph of each article → `meta.excerpt`.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use super::{BuildContext, Plugin};
use crate::page::FileMap;

static FIRST_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    // Inner HTML of the first <p> element. Articles are rendered markdown,
    // so paragraphs never nest.
    Regex::new(r"(?s)<p[^>]*>(.*?)</p>").unwrap()
});

pub struct ExcerptExtractor;

impl Plugin for ExcerptExtractor {
    fn name(&self) -> &'static str {
        "excerpts"
    }

    fn run(&self, files: &mut FileMap, ctx: &mut BuildContext) -> Result<()> {
        let members: Vec<String> = ctx.collections.values().flatten().cloned().collect();

        for key in members {
            let Some(file) = files.get_mut(&key) else {
                continue;
            };
            // A front matter excerpt wins over the extracted one
            if file.meta.excerpt.is_some() {
                continue;
            }
            if let Ok(html) = file.contents_str() {
                file.meta.excerpt = extract_excerpt(html);
            }
        }
        Ok(())
    }
}

/// Inner HTML of the first paragraph, if any.
pub fn extract_excerpt(html: &str) -> Option<String> {
    FIRST_PARAGRAPH
        .captures(html)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_first_paragraph() {
        let html = "<h1>Title</h1>\n<p>First <em>para</em>.</p>\n<p>Second.</p>";
        assert_eq!(
            extract_excerpt(html),
            Some("First <em>para</em>.".to_string())
        );
    }

    #[test]
    fn test_extract_no_paragraph() {
        assert_eq!(extract_excerpt("<h1>Just a heading</h1>"), None);
        assert_eq!(extract_excerpt(""), None);
    }

    #[test]
    fn test_extract_multiline_paragraph() {
        let html = "<p>line one\nline two</p>";
        assert_eq!(extract_excerpt(html), Some("line one\nline two".to_string()));
    }

    #[test]
    fn test_extract_paragraph_with_attributes() {
        let html = "<p class=\"lead\">intro</p>";
        assert_eq!(extract_excerpt(html), Some("intro".to_string()));
    }
}
