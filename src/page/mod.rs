//! Page types: metadata, file contents, and the build file map.

mod front_matter;
mod meta;

pub use front_matter::FrontMatterExtractor;
pub use meta::PageMeta;

use std::collections::BTreeMap;

use anyhow::{Result, anyhow};

/// A JSON object map for storing arbitrary metadata fields.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// All files flowing through a build, keyed by root-relative path
/// (forward slashes on every platform).
///
/// BTreeMap keeps iteration order stable across runs.
pub type FileMap = BTreeMap<String, PageFile>;

/// A single file in the build: raw contents plus parsed metadata.
#[derive(Debug, Clone, Default)]
pub struct PageFile {
    pub contents: Vec<u8>,
    pub meta: PageMeta,
}

impl PageFile {
    pub fn new(contents: Vec<u8>) -> Self {
        Self {
            contents,
            meta: PageMeta::default(),
        }
    }

    pub fn with_meta(contents: Vec<u8>, meta: PageMeta) -> Self {
        Self { contents, meta }
    }

    /// View contents as UTF-8. Fails on binary data.
    pub fn contents_str(&self) -> Result<&str> {
        std::str::from_utf8(&self.contents).map_err(|e| anyhow!("file is not valid UTF-8: {}", e))
    }

    /// Replace contents with a rendered string.
    pub fn set_contents(&mut self, contents: String) {
        self.contents = contents.into_bytes();
    }
}
