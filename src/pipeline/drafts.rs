//! Drafts stage: drop pages marked `draft: true`.

use anyhow::Result;

use super::{BuildContext, Plugin};
use crate::config::cfg;
use crate::page::FileMap;

pub struct DraftFilter;

impl Plugin for DraftFilter {
    fn name(&self) -> &'static str {
        "drafts"
    }

    fn run(&self, files: &mut FileMap, ctx: &mut BuildContext) -> Result<()> {
        if cfg().build.include_drafts {
            return Ok(());
        }
        ctx.drafts_skipped = remove_drafts(files);
        Ok(())
    }
}

/// Remove draft pages, returning how many were dropped.
pub fn remove_drafts(files: &mut FileMap) -> usize {
    let before = files.len();
    files.retain(|_, file| !file.meta.draft);
    before - files.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{PageFile, PageMeta};

    fn draft(is_draft: bool) -> PageFile {
        PageFile::with_meta(
            Vec::new(),
            PageMeta {
                draft: is_draft,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_remove_drafts() {
        let mut files = FileMap::new();
        files.insert("a.md".into(), draft(true));
        files.insert("b.md".into(), draft(false));
        files.insert("c.md".into(), draft(true));

        let skipped = remove_drafts(&mut files);

        assert_eq!(skipped, 2);
        assert_eq!(files.len(), 1);
        assert!(files.contains_key("b.md"));
    }

    #[test]
    fn test_remove_drafts_none_marked() {
        let mut files = FileMap::new();
        files.insert("a.md".into(), draft(false));

        assert_eq!(remove_drafts(&mut files), 0);
        assert_eq!(files.len(), 1);
    }
}
