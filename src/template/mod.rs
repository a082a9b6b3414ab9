//! Template rendering.
//!
//! Layouts are Tera templates loaded from the configured layouts directory.
//! Rendered page content arrives pre-escaped, so autoescaping is off and
//! layouts can write `{{ contents }}` directly.

mod filters;

use std::path::Path;

use anyhow::{Context as _, Result};
use tera::Tera;

pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Load every `.html` template under the layouts directory.
    pub fn from_dir(layouts: &Path) -> Result<Self> {
        let glob = format!("{}/**/*.html", layouts.display());
        let mut tera = Tera::new(&glob)
            .with_context(|| format!("failed to load templates from {}", layouts.display()))?;
        tera.autoescape_on(vec![]);
        filters::register(&mut tera);
        Ok(Self { tera })
    }

    /// True if a template with this name was loaded.
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    pub fn render(&self, name: &str, context: &tera::Context) -> Result<String> {
        self.tera
            .render(name, context)
            .with_context(|| format!("failed to render template '{}'", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn engine_with(templates: &[(&str, &str)]) -> (TempDir, TemplateEngine) {
        let temp = TempDir::new().unwrap();
        for (name, content) in templates {
            let path = temp.path().join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, content).unwrap();
        }
        let engine = TemplateEngine::from_dir(temp.path()).unwrap();
        (temp, engine)
    }

    #[test]
    fn test_render_basic() {
        let (_tmp, engine) = engine_with(&[("article.html", "<h1>{{ title }}</h1>")]);

        let mut ctx = tera::Context::new();
        ctx.insert("title", "Hello");

        let html = engine.render("article.html", &ctx).unwrap();
        assert_eq!(html, "<h1>Hello</h1>");
    }

    #[test]
    fn test_no_autoescape() {
        let (_tmp, engine) = engine_with(&[("raw.html", "{{ contents }}")]);

        let mut ctx = tera::Context::new();
        ctx.insert("contents", "<p>hi</p>");

        let html = engine.render("raw.html", &ctx).unwrap();
        assert_eq!(html, "<p>hi</p>");
    }

    #[test]
    fn test_has_template() {
        let (_tmp, engine) = engine_with(&[("article.html", "x"), ("partials/head.html", "y")]);

        assert!(engine.has_template("article.html"));
        assert!(engine.has_template("partials/head.html"));
        assert!(!engine.has_template("missing.html"));
    }

    #[test]
    fn test_limit_filter_in_template() {
        let (_tmp, engine) = engine_with(&[(
            "list.html",
            "{% for x in items | limit(count=2) %}{{ x }}{% endfor %}",
        )]);

        let mut ctx = tera::Context::new();
        ctx.insert("items", &[1, 2, 3, 4]);

        // limit keeps one extra item so templates can detect a next page
        let html = engine.render("list.html", &ctx).unwrap();
        assert_eq!(html, "123");
    }

    #[test]
    fn test_missing_template_errors() {
        let (_tmp, engine) = engine_with(&[("article.html", "x")]);
        let ctx = tera::Context::new();
        assert!(engine.render("nope.html", &ctx).is_err());
    }
}
