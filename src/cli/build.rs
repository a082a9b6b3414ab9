//! Site building orchestration.
//!
//! Build phases:
//! - **Collect** - Read the content tree into the file map
//! - **Pipeline** - Run every stage in order (see `pipeline::stages`)
//! - **Write** - Persist the file map under the output directory

use std::time::Instant;

use anyhow::Result;

use crate::config::SiteConfig;
use crate::log;
use crate::pipeline;
use crate::utils::plural::plural_count;

/// Counts reported after a build.
#[derive(Debug, Clone, Copy)]
pub struct BuildSummary {
    /// Files written to the output directory.
    pub files_written: usize,
    /// Draft pages dropped by the pipeline.
    pub drafts_skipped: usize,
}

/// Build the entire site.
///
/// `quiet` suppresses per-phase logging (used by watch-mode rebuilds,
/// which report through the status line instead).
pub fn build_site(config: &SiteConfig, quiet: bool) -> Result<BuildSummary> {
    let start = Instant::now();

    let mut files = pipeline::read::read_content(&config.build.content)?;
    if !quiet {
        log!("build"; "collected {}", plural_count(files.len(), "file"));
    }

    let ctx = pipeline::run(&mut files)?;
    if !quiet && ctx.drafts_skipped > 0 {
        log!("build"; "{} skipped", plural_count(ctx.drafts_skipped, "draft"));
    }

    pipeline::write::write_output(&config.build.output, &files, config.build.clean)?;

    let summary = BuildSummary {
        files_written: files.len(),
        drafts_skipped: ctx.drafts_skipped,
    };

    if !quiet {
        log!(
            "build";
            "wrote {} to {} in {:.2?}",
            plural_count(summary.files_written, "file"),
            config.root_relative(&config.build.output).display(),
            start.elapsed()
        );
    }

    Ok(summary)
}
