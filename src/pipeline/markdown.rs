//! Markdown stage: convert `.md` entries to HTML.
//!
//! Conversion is pure per page, so pages render in parallel. Fenced code
//! blocks are replaced with syntect-highlighted HTML when highlighting is
//! enabled; unknown languages fall back to plain text instead of failing
//! the build.

use anyhow::Result;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use rayon::prelude::*;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::{BuildContext, Plugin};
use crate::config::{MarkdownConfig, cfg};
use crate::debug;
use crate::page::FileMap;

pub struct MarkdownConverter;

impl Plugin for MarkdownConverter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn run(&self, files: &mut FileMap, ctx: &mut BuildContext) -> Result<()> {
        let config = cfg();
        let renames = convert_all(files, &config.markdown)?;
        for (old, new) in &renames {
            ctx.rename_key(old, new);
        }
        Ok(())
    }
}

/// Convert every `.md` entry, swapping its key's extension to `.html`.
///
/// Returns the `(old_key, new_key)` renames that were applied.
pub fn convert_all(
    files: &mut FileMap,
    config: &MarkdownConfig,
) -> Result<Vec<(String, String)>> {
    let options = config.to_pulldown_options();
    let highlighter = config.highlight.then(SyntaxHighlighter::new);

    // Snapshot sources so rendering can run without holding the map.
    let sources: Vec<(String, String)> = files
        .iter()
        .filter(|(key, _)| key.ends_with(".md"))
        .map(|(key, file)| Ok((key.clone(), file.contents_str()?.to_string())))
        .collect::<Result<_>>()?;

    let rendered: Vec<(String, String)> = sources
        .par_iter()
        .map(|(key, body)| convert(body, options, highlighter.as_ref()).map(|html| (key.clone(), html)))
        .collect::<Result<_>>()?;

    let mut renames = Vec::with_capacity(rendered.len());
    for (key, html) in rendered {
        let Some(mut file) = files.remove(&key) else {
            continue;
        };
        file.set_contents(html);

        let new_key = format!("{}.html", key.trim_end_matches(".md"));
        files.insert(new_key.clone(), file);
        renames.push((key, new_key));
    }

    Ok(renames)
}

/// Render one markdown body to HTML.
fn convert(body: &str, options: Options, highlighter: Option<&SyntaxHighlighter>) -> Result<String> {
    let parser = Parser::new_ext(body, options);

    let mut events = Vec::new();
    // (language token, accumulated code) while inside a fenced block
    let mut code_block: Option<(Option<String>, String)> = None;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) if highlighter.is_some() => {
                let lang = match &kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .filter(|token| !token.is_empty())
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                };
                code_block = Some((lang, String::new()));
            }
            Event::Text(text) if code_block.is_some() => {
                if let Some((_, buffer)) = code_block.as_mut() {
                    buffer.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) if code_block.is_some() => {
                if let Some((lang, code)) = code_block.take()
                    && let Some(highlighter) = highlighter
                {
                    let html = highlighter.highlight(&code, lang.as_deref())?;
                    events.push(Event::Html(html.into()));
                }
            }
            other => events.push(other),
        }
    }

    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, events.into_iter());
    Ok(html)
}

/// Syntect wrapper with the default syntax set and theme.
pub struct SyntaxHighlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl SyntaxHighlighter {
    /// # Panics
    ///
    /// Panics if syntect's default theme set lacks "base16-ocean.light".
    pub fn new() -> Self {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        let theme = ThemeSet::load_defaults()
            .themes
            .remove("base16-ocean.light")
            .expect("default theme set should include \"base16-ocean.light\"");
        Self { syntaxes, theme }
    }

    /// Highlight a code block, falling back to plain text for unknown
    /// language tokens.
    pub fn highlight(&self, code: &str, language: Option<&str>) -> Result<String> {
        let syntax = match language {
            Some(lang) => self.syntaxes.find_syntax_by_token(lang).unwrap_or_else(|| {
                debug!("markdown"; "no syntax for '{}', using plain text", lang);
                self.syntaxes.find_syntax_plain_text()
            }),
            None => self.syntaxes.find_syntax_plain_text(),
        };

        highlighted_html_for_string(code, &self.syntaxes, syntax, &self.theme)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{PageFile, PageMeta};

    fn md_file(body: &str) -> PageFile {
        PageFile::with_meta(body.as_bytes().to_vec(), PageMeta::default())
    }

    #[test]
    fn test_convert_all_renames_keys() {
        let mut files = FileMap::new();
        files.insert("articles/post.md".into(), md_file("# Title\n\nbody"));
        files.insert("style.css".into(), PageFile::new(b"p{}".to_vec()));

        let renames = convert_all(&mut files, &MarkdownConfig::default()).unwrap();

        assert_eq!(
            renames,
            vec![("articles/post.md".to_string(), "articles/post.html".to_string())]
        );
        assert!(!files.contains_key("articles/post.md"));
        let html = files["articles/post.html"].contents_str().unwrap();
        assert!(html.contains("<h1>Title</h1>"));
        // non-markdown untouched
        assert_eq!(files["style.css"].contents, b"p{}");
    }

    #[test]
    fn test_convert_tables_extension() {
        let body = "| a | b |\n|---|---|\n| 1 | 2 |\n";
        let html = convert(
            body,
            MarkdownConfig::default().to_pulldown_options(),
            None,
        )
        .unwrap();
        assert!(html.contains("<table>"));

        let config = MarkdownConfig {
            tables: false,
            ..Default::default()
        };
        let html = convert(body, config.to_pulldown_options(), None).unwrap();
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_convert_highlights_fenced_code() {
        let highlighter = SyntaxHighlighter::new();
        let body = "```rust\nlet x = 1;\n```\n";
        let html = convert(
            body,
            MarkdownConfig::default().to_pulldown_options(),
            Some(&highlighter),
        )
        .unwrap();

        // syntect emits inline-styled pre blocks instead of <code>
        assert!(html.contains("<pre style="));
        assert!(!html.contains("<code>"));
    }

    #[test]
    fn test_convert_unknown_language_falls_back() {
        let highlighter = SyntaxHighlighter::new();
        let body = "```nosuchlang\nhello\n```\n";
        let html = convert(
            body,
            MarkdownConfig::default().to_pulldown_options(),
            Some(&highlighter),
        )
        .unwrap();
        assert!(html.contains("hello"));
    }

    #[test]
    fn test_convert_without_highlighting_keeps_code_tags() {
        let body = "```rust\nlet x = 1;\n```\n";
        let html = convert(
            body,
            MarkdownConfig::default().to_pulldown_options(),
            None,
        )
        .unwrap();
        assert!(html.contains("<code"));
    }
}
