//! Site configuration management for `adom.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── site       # [site]
//! │   ├── build      # [build]
//! │   ├── markdown   # [markdown]
//! │   ├── collections# [collections.*]
//! │   ├── pagination # [pagination]
//! │   ├── archive    # [archive]
//! │   ├── tags       # [tags]
//! │   ├── comments   # [comments]
//! │   └── serve      # [serve]
//! ├── error.rs       # ConfigError, diagnostics
//! ├── handle.rs      # Global config handle
//! └── mod.rs         # SiteConfig (this file)
//! ```

pub mod error;
pub mod handle;
pub mod section;
mod util;

use util::find_config_file;

// Re-export from section/
pub use section::{
    ArchiveConfig, AssetsConfig, BuildConfig, CollectionConfig, CommentsConfig, MarkdownConfig,
    PaginationConfig, ServeConfig, SiteInfoConfig, TagsConfig,
};

pub use error::{ConfigDiagnostics, ConfigError, FieldPath};
pub use handle::{cfg, clear_clean_flag, init_config};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing adom.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// CLI arguments reference (internal use only)
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site metadata
    #[serde(default)]
    pub site: SiteInfoConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Markdown conversion settings
    #[serde(default)]
    pub markdown: MarkdownConfig,

    /// Named content collections
    #[serde(default = "section::default_collections")]
    pub collections: BTreeMap<String, CollectionConfig>,

    /// Articles index paging
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Yearly archive pages
    #[serde(default)]
    pub archive: ArchiveConfig,

    /// Tag pages
    #[serde(default)]
    pub tags: TagsConfig,

    /// Commento widget injection
    #[serde(default)]
    pub comments: CommentsConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            cli: None,
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            site: SiteInfoConfig::default(),
            build: BuildConfig::default(),
            markdown: MarkdownConfig::default(),
            collections: section::default_collections(),
            pagination: PaginationConfig::default(),
            archive: ArchiveConfig::default(),
            tags: TagsConfig::default(),
            comments: CommentsConfig::default(),
            serve: ServeConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root
    /// is the config file's parent directory.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let (config_path, exists) = Self::resolve_config_path(cli)?;

        if !exists {
            log!(
                "error";
                "Config file '{}' not found. Create one at the project root.",
                cli.config.display()
            );
            std::process::exit(1);
        }

        let mut config = Self::from_path(&config_path)?;

        config.config_path = config_path;
        config.cli = Some(cli);
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Resolve config file path by searching upward from cwd.
    fn resolve_config_path(cli: &Cli) -> Result<(PathBuf, bool)> {
        let cwd = std::env::current_dir()?;

        match find_config_file(&cli.config) {
            Some(path) => Ok((path, true)),
            None => Ok((cwd.join(&cli.config), false)),
        }
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        self.set_root(&root);
        self.normalize_paths(&root);
        self.apply_command_options(cli);
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
            if !Self::prompt_continue()? {
                bail!("Aborted due to unknown config fields");
            }
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        // Show only filename (adom.toml) since it's always at site root
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        eprintln!();
        log!("warning"; "unknown fields in {}:", display_path);
        log!("warning"; "ignoring:");
        for field in fields {
            eprintln!("- {}", field);
        }
        eprintln!();
    }

    /// Prompt user to continue. Returns true only if user explicitly confirms.
    fn prompt_continue() -> Result<bool> {
        use std::io::{self, Write};

        eprint!("Continue? [y/N] ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let input = input.trim().to_lowercase();
        // Default no (empty input), explicit "y" or "yes" to continue
        Ok(input == "y" || input == "yes")
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Get path relative to the site root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Get CLI arguments reference
    pub const fn get_cli(&self) -> &'static Cli {
        match self.cli {
            Some(cli) => cli,
            None => panic!("CLI arguments not initialized"),
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args } => {
                self.apply_build_args(build_args, false);
            }
            Commands::Serve {
                build_args,
                interface,
                port,
                watch,
            } => {
                self.apply_build_args(build_args, true);
                self.apply_serve_options(*interface, *port, *watch);
            }
        }
    }

    /// Apply build arguments from CLI.
    ///
    /// `is_serve`: If true, drafts are always kept so they can be previewed.
    fn apply_build_args(&mut self, args: &BuildArgs, is_serve: bool) {
        // Set verbose mode globally
        crate::logger::set_verbose(args.verbose);

        self.build.clean = args.clean;
        self.build.include_drafts = if is_serve { true } else { args.drafts };
    }

    /// Apply serve-specific options.
    fn apply_serve_options(
        &mut self,
        interface: Option<std::net::IpAddr>,
        port: Option<u16>,
        watch: Option<bool>,
    ) {
        Self::update_option(&mut self.serve.interface, interface.as_ref());
        Self::update_option(&mut self.serve.port, port.as_ref());
        Self::update_option(&mut self.serve.watch, watch.as_ref());

        // Set base URL for local development when none is configured
        if self.site.url.is_none() {
            self.site.url = Some(format!(
                "http://{}:{}",
                self.serve.interface, self.serve.port
            ));
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize all paths relative to root directory.
    fn normalize_paths(&mut self, root: &Path) {
        let cli = self.get_cli();

        // Apply CLI path overrides first
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        // Normalize root to absolute path
        let root = crate::utils::path::normalize_path(root);
        self.set_root(&root);

        // Normalize config path (already set in load(), just canonicalize)
        self.config_path = crate::utils::path::normalize_path(&self.config_path);

        self.build.normalize(&root);
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        if !self.config_path.exists() {
            bail!(ConfigError::Validation("config file not found".into()));
        }

        self.site.validate(&mut diag);
        self.build.validate(&mut diag);
        self.pagination.validate(&mut diag);
        self.archive.validate(&mut diag);
        self.tags.validate(&mut diag);
        section::validate_collections(&self.collections, &mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from a TOML snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_invalid_toml() {
        // Invalid TOML syntax - unclosed bracket
        let result: Result<SiteConfig, _> = toml::from_str("[site\nname = \"My Blog\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_set_root() {
        let mut config = SiteConfig::default();
        config.set_root(Path::new("/custom/path"));
        assert_eq!(config.get_root(), Path::new("/custom/path"));
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();

        assert!(config.cli.is_none());
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.site.name, "");
        assert_eq!(config.serve.port, 8081);
        assert_eq!(config.pagination.per_page, 5);
        assert!(config.collections.contains_key("articles"));
    }

    #[test]
    fn test_default_collection_survives_parse() {
        // An adom.toml without [collections.*] still gets the articles set
        let config = test_parse_config("[site]\nname = \"Test\"");
        assert_eq!(
            config.collections.get("articles").map(|c| c.pattern.as_str()),
            Some("articles/**/*.md")
        );
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\nname = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        // Config should parse successfully
        assert_eq!(config.site.name, "Test");

        // Unknown fields should be collected
        assert!(!ignored.is_empty());
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[site]\nname = \"Test\"\ndescription = \"Test\"";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_root_relative() {
        let mut config = SiteConfig::default();
        config.set_root(Path::new("/site"));
        assert_eq!(
            config.root_relative("/site/content/a.md"),
            PathBuf::from("content/a.md")
        );
        assert_eq!(
            config.root_relative("/elsewhere/a.md"),
            PathBuf::from("/elsewhere/a.md")
        );
    }
}
