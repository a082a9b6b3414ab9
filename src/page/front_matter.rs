//! Front matter extraction from YAML-like (`---`) or TOML (`+++`) fences.

use anyhow::Result;

use super::PageMeta;
use super::meta::is_truthy;

/// Metadata extractor for content files
pub struct FrontMatterExtractor;

impl FrontMatterExtractor {
    /// Extract front matter and return (metadata, body).
    pub fn extract<'a>(&self, content: &'a str) -> Result<Option<(PageMeta, &'a str)>> {
        match Self::detect(content) {
            Some((fm, body, is_toml)) => {
                let meta = if is_toml {
                    Self::parse_toml(fm)?
                } else {
                    Self::parse_yaml_like(fm)
                };
                Ok(Some((meta, body)))
            }
            None => Ok(None),
        }
    }

    /// Parse simple YAML-like front matter (key: value).
    ///
    /// Supports standard fields (title, date, etc.) and custom fields in `extra`.
    fn parse_yaml_like(content: &str) -> PageMeta {
        let mut meta = PageMeta::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once(':') {
                let key_lower = key.trim().to_lowercase();
                let value = value.trim();

                match key_lower.as_str() {
                    "title" => meta.title = Some(value.to_string()),
                    "date" => meta.date = Some(value.to_string()),
                    "author" => meta.author = Some(value.to_string()),
                    "layout" => meta.layout = Some(value.to_string()),
                    "excerpt" => meta.excerpt = Some(value.to_string()),
                    "draft" => meta.draft = is_truthy(value),
                    "comments" => meta.comments = is_truthy(value),
                    "comments-counter" => meta.comments_counter = is_truthy(value),
                    "tags" => {
                        meta.tags = value
                            .split(',')
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty())
                            .collect();
                    }
                    _ => {
                        // Custom field -> extra (preserve original key case)
                        let key = key.trim().to_string();
                        let json_value = parse_yaml_value(value);
                        meta.extra.insert(key, json_value);
                    }
                }
            }
        }

        meta
    }

    /// Parse TOML front matter.
    fn parse_toml(content: &str) -> Result<PageMeta> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Invalid TOML front matter: {}", e))
    }

    /// Detect and extract front matter.
    /// Returns `(front_matter, body, is_toml)` if found.
    fn detect(content: &str) -> Option<(&str, &str, bool)> {
        let trimmed = content.trim_start();

        // YAML: ---...---
        if trimmed.starts_with("---")
            && let Some(end) = trimmed[3..].find("\n---")
        {
            let fm = trimmed[3..3 + end].trim();
            let body = trimmed[3 + end + 4..].trim_start_matches('\n');
            return Some((fm, body, false));
        }

        // TOML: +++...+++
        if trimmed.starts_with("+++")
            && let Some(end) = trimmed[3..].find("\n+++")
        {
            let fm = trimmed[3..3 + end].trim();
            let body = trimmed[3 + end + 4..].trim_start_matches('\n');
            return Some((fm, body, true));
        }

        None
    }
}

/// Parse a YAML-like value string to JSON value
///
/// Supports:
/// - Booleans: `true`, `false`
/// - Numbers: `123`, `3.14`
/// - Arrays: `a, b, c` -> `["a", "b", "c"]`
/// - Strings: everything else
fn parse_yaml_value(s: &str) -> serde_json::Value {
    use serde_json::Value;

    // Boolean
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    // Null
    if s.eq_ignore_ascii_case("null") || s == "~" {
        return Value::Null;
    }

    // Number (integer)
    if let Ok(n) = s.parse::<i64>() {
        return Value::Number(n.into());
    }

    // Number (float)
    if let Ok(n) = s.parse::<f64>()
        && let Some(num) = serde_json::Number::from_f64(n)
    {
        return Value::Number(num);
    }

    // Comma-separated array (if contains comma)
    if s.contains(',') {
        let arr: Vec<Value> = s
            .split(',')
            .map(|item| Value::String(item.trim().to_string()))
            .filter(|v| !matches!(v, Value::String(s) if s.is_empty()))
            .collect();
        return Value::Array(arr);
    }

    // Default: string
    Value::String(s.to_string())
}
