//! Assets stage: copy the static asset tree into the file map.

use std::path::Path;

use anyhow::{Context as _, Result};

use super::{BuildContext, Plugin};
use crate::config::cfg;
use crate::page::{FileMap, PageFile};
use crate::utils::path::path_to_key;

pub struct AssetCopier;

impl Plugin for AssetCopier {
    fn name(&self) -> &'static str {
        "assets"
    }

    fn run(&self, files: &mut FileMap, _ctx: &mut BuildContext) -> Result<()> {
        let config = cfg();
        copy_assets(files, &config.build.assets.source, &config.build.assets.dest)
    }
}

/// Load every file under `source` into the map under the `dest` prefix.
///
/// A missing source directory is fine; themes without static assets skip
/// the stage. Asset entries go through the write stage like any page, so
/// they are written out together with the rest of the site.
pub fn copy_assets(files: &mut FileMap, source: &Path, dest: &str) -> Result<()> {
    if !source.exists() {
        return Ok(());
    }

    for entry in jwalk::WalkDir::new(source).sort(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let rel = path.strip_prefix(source).unwrap_or(&path).to_path_buf();
        let key = format!("{}/{}", dest.trim_end_matches('/'), path_to_key(&rel));

        let contents = std::fs::read(&path)
            .with_context(|| format!("failed to read asset {}", path.display()))?;
        files.insert(key, PageFile::new(contents));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_assets_prefixes_dest() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("css")).unwrap();
        std::fs::write(dir.path().join("css/site.css"), "p{}").unwrap();
        std::fs::write(dir.path().join("logo.png"), [0xffu8]).unwrap();

        let mut files = FileMap::new();
        copy_assets(&mut files, dir.path(), "assets").unwrap();

        assert_eq!(files["assets/css/site.css"].contents, b"p{}");
        assert_eq!(files["assets/logo.png"].contents, vec![0xff]);
    }

    #[test]
    fn test_copy_assets_missing_source_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut files = FileMap::new();
        copy_assets(&mut files, &dir.path().join("nope"), "assets").unwrap();
        assert!(files.is_empty());
    }
}
