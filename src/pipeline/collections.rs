//! Collections stage: group content files into named, sorted lists.

use anyhow::Result;
use serde_json::Value;

use super::{BuildContext, Plugin};
use crate::config::{CollectionConfig, cfg};
use crate::page::FileMap;
use crate::utils::glob::GlobPattern;

pub struct Collector;

impl Plugin for Collector {
    fn name(&self) -> &'static str {
        "collections"
    }

    fn run(&self, files: &mut FileMap, ctx: &mut BuildContext) -> Result<()> {
        let config = cfg();
        for (name, collection) in &config.collections {
            let members = collect(files, collection)?;
            ctx.collections.insert(name.clone(), members);
        }
        Ok(())
    }
}

/// Gather and sort the keys matching a collection's pattern.
pub fn collect(files: &FileMap, config: &CollectionConfig) -> Result<Vec<String>> {
    let pattern = GlobPattern::new(&config.pattern)?;

    let mut members: Vec<&String> = files.keys().filter(|key| pattern.matches(key)).collect();

    // Sort by the serialized metadata field. Date strings are ISO-ordered
    // so plain string comparison gives chronological order.
    members.sort_by_cached_key(|key| sort_value(files, key, &config.sort_by));
    if config.reverse {
        members.reverse();
    }

    Ok(members.into_iter().cloned().collect())
}

fn sort_value(files: &FileMap, key: &str, field: &str) -> String {
    let Some(file) = files.get(key) else {
        return String::new();
    };
    let meta = serde_json::to_value(&file.meta).unwrap_or(Value::Null);
    match &meta[field] {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
