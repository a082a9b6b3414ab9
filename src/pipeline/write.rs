//! Write stage: file map → output directory.

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::page::FileMap;

/// Write every file map entry under the output directory.
///
/// `clean` removes the output directory first (full rebuild). Parent
/// directories are created as needed.
pub fn write_output(output_dir: &Path, files: &FileMap, clean: bool) -> Result<()> {
    if clean && output_dir.exists() {
        std::fs::remove_dir_all(output_dir)
            .with_context(|| format!("failed to clean {}", output_dir.display()))?;
    }

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    for (key, file) in files {
        let path = output_dir.join(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, &file.contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(())
}
