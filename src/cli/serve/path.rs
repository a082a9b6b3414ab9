//! URL to filesystem path resolution.

use std::path::{Path, PathBuf};

/// Resolve a request URL to a file under the output directory.
///
/// Tries, in order: the path itself, `<path>/index.html` for directories,
/// and `<path>.html` for extensionless URLs. Traversal outside the serve
/// root is rejected by canonicalization.
pub fn resolve_path(url: &str, serve_root: &Path) -> Option<PathBuf> {
    let clean = normalize_url(url);

    // Reject paths with suspicious patterns early
    if clean.contains("..") {
        return None;
    }

    let local = serve_root.join(&clean);

    if let Some(path) = existing_under_root(&local, serve_root) {
        return Some(path);
    }

    // Extensionless URL → .html fallback
    if !clean.is_empty() && Path::new(&clean).extension().is_none() {
        let html = serve_root.join(format!("{clean}.html"));
        if let Some(path) = existing_under_root(&html, serve_root)
            && path.is_file()
        {
            return Some(path);
        }
    }

    None
}

/// Canonicalize and verify containment, resolving directories to their
/// `index.html`.
fn existing_under_root(local: &Path, serve_root: &Path) -> Option<PathBuf> {
    // Canonicalize to resolve symlinks and verify path is under serve_root
    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}

/// Normalize URL: strip query string, decode, trim slashes.
///
/// The query is cut from the raw URL before decoding so an encoded `%3F`
/// in a path segment stays part of the path.
fn normalize_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;
    let path = url.split('?').next().unwrap_or(url);

    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    decoded.trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("hello-world")).unwrap();
        std::fs::write(dir.path().join("hello-world/index.html"), "post").unwrap();
        std::fs::create_dir_all(dir.path().join("topics")).unwrap();
        std::fs::write(dir.path().join("topics/azure.html"), "tag").unwrap();
        std::fs::write(dir.path().join("index.html"), "home").unwrap();
        dir
    }

    #[test]
    fn test_resolve_root_to_index() {
        let dir = site();
        let path = resolve_path("/", dir.path()).unwrap();
        assert!(path.ends_with("index.html"));
    }

    #[test]
    fn test_resolve_directory_to_index() {
        let dir = site();
        let path = resolve_path("/hello-world/", dir.path()).unwrap();
        assert!(path.ends_with("hello-world/index.html"));
    }

    #[test]
    fn test_resolve_extensionless_html_fallback() {
        let dir = site();
        let path = resolve_path("/topics/azure", dir.path()).unwrap();
        assert!(path.ends_with("topics/azure.html"));
    }

    #[test]
    fn test_resolve_strips_query_string() {
        let dir = site();
        let path = resolve_path("/hello-world/?ref=feed", dir.path()).unwrap();
        assert!(path.ends_with("hello-world/index.html"));
    }

    #[test]
    fn test_resolve_percent_decoding() {
        let dir = site();
        std::fs::write(dir.path().join("a b.html"), "x").unwrap();
        let path = resolve_path("/a%20b.html", dir.path()).unwrap();
        assert!(path.ends_with("a b.html"));
    }

    #[test]
    fn test_resolve_encoded_question_mark_stays_in_path() {
        let dir = site();
        std::fs::write(dir.path().join("a?b.html"), "x").unwrap();
        let path = resolve_path("/a%3Fb.html", dir.path()).unwrap();
        assert!(path.ends_with("a?b.html"));
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let dir = site();
        assert!(resolve_path("/../etc/passwd", dir.path()).is_none());
        assert!(resolve_path("/%2e%2e/secret", dir.path()).is_none());
    }

    #[test]
    fn test_resolve_missing_file() {
        let dir = site();
        assert!(resolve_path("/nope.html", dir.path()).is_none());
        assert!(resolve_path("/missing/", dir.path()).is_none());
    }
}
