//! Read stage: content directory → file map.

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::page::{FileMap, FrontMatterExtractor, PageFile, PageMeta};
use crate::utils::path::path_to_key;

/// Walk the content directory and load every file.
///
/// Markdown files get their front matter parsed into metadata, with the
/// fence stripped from the contents. Everything else passes through with
/// default metadata.
pub fn read_content(content_dir: &Path) -> Result<FileMap> {
    let mut files = FileMap::new();

    if !content_dir.exists() {
        anyhow::bail!(
            "content directory '{}' does not exist",
            content_dir.display()
        );
    }

    for entry in jwalk::WalkDir::new(content_dir).sort(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let rel = path
            .strip_prefix(content_dir)
            .unwrap_or(&path)
            .to_path_buf();
        let key = path_to_key(&rel);

        let file = load_file(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        files.insert(key, file);
    }

    Ok(files)
}

fn load_file(path: &Path) -> Result<PageFile> {
    let is_markdown = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("md"));

    if !is_markdown {
        return Ok(PageFile::new(std::fs::read(path)?));
    }

    let text = std::fs::read_to_string(path)?;
    match FrontMatterExtractor.extract(&text)? {
        Some((meta, body)) => Ok(PageFile::with_meta(body.as_bytes().to_vec(), meta)),
        None => Ok(PageFile::with_meta(text.into_bytes(), PageMeta::default())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, rel: &str, content: &str) {
        let path = dir.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_read_content_parses_front_matter() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "articles/hello.md",
            "---\ntitle: Hello\ncomments: true\n---\n# Hi\n",
        );

        let files = read_content(dir.path()).unwrap();
        let file = &files["articles/hello.md"];

        assert_eq!(file.meta.title.as_deref(), Some("Hello"));
        assert!(file.meta.comments);
        assert_eq!(file.contents_str().unwrap(), "# Hi\n");
    }

    #[test]
    fn test_read_content_passes_other_files_through() {
        let dir = TempDir::new().unwrap();
        write(&dir, "about.html", "<p>about</p>");
        write(&dir, "articles/nested/post.md", "no front matter");

        let files = read_content(dir.path()).unwrap();

        assert_eq!(files["about.html"].contents, b"<p>about</p>");
        assert_eq!(
            files["articles/nested/post.md"].contents_str().unwrap(),
            "no front matter"
        );
        assert!(files["articles/nested/post.md"].meta.title.is_none());
    }

    #[test]
    fn test_read_content_missing_dir_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(read_content(&missing).is_err());
    }
}
