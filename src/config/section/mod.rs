//! Configuration section definitions.
//!
//! Each module corresponds to a section in `adom.toml`:
//!
//! | Module        | TOML Section      | Purpose                        |
//! |---------------|-------------------|--------------------------------|
//! | `site`        | `[site]`          | Site metadata for templates    |
//! | `build`       | `[build]`         | Directories, assets, layouts   |
//! | `markdown`    | `[markdown]`      | Markdown extensions, highlight |
//! | `collections` | `[collections.*]` | Named content collections      |
//! | `pagination`  | `[pagination]`    | Articles index paging          |
//! | `archive`     | `[archive]`       | Yearly archive pages           |
//! | `tags`        | `[tags]`          | Tag pages                      |
//! | `comments`    | `[comments]`      | Commento widget injection      |
//! | `serve`       | `[serve]`         | Development server             |

mod archive;
mod build;
mod collections;
mod comments;
mod markdown;
mod pagination;
mod serve;
mod site;
mod tags;

// Re-export section configs
pub use archive::ArchiveConfig;
pub use build::{AssetsConfig, BuildConfig};
pub use collections::{CollectionConfig, default_collections, validate_collections};
pub use comments::CommentsConfig;
pub use markdown::MarkdownConfig;
pub use pagination::PaginationConfig;
pub use serve::ServeConfig;
pub use site::SiteInfoConfig;
pub use tags::TagsConfig;
