//! Site configuration management for `config.toml`.
//!
//! # Sections
//!
//! | Section        | Purpose                                          |
//! |----------------|--------------------------------------------------|
//! | `[base]`       | Folders, listing sizes, cut tag, site metadata   |
//! | `[<lang>]`     | Per-language title, description, author, feed    |
//!
//! # Example
//!
//! ```toml
//! [base]
//! source_folder = "source"
//! templates_folder = "templates"
//! public_folder = "public"
//! posts_per_page = 10
//! posts_in_feed = 20
//! url = "https://example.com"
//!
//! [en]
//! title = "Blog"
//! description = "Notes on frontend"
//! author = "Artem"
//!
//! [ru]
//! title = "Блог"
//! description = "Заметки о фронтенде"
//! author = "Артём"
//! ```

mod base;
pub mod defaults;
mod error;
mod lang;

pub use base::BaseConfig;
pub use error::ConfigError;
pub use lang::{LangConfig, LangOptions};

use crate::{build::BuildMode, cli::Cli};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing config.toml.
///
/// Every table other than `[base]` is a language section keyed by its code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub base: BaseConfig,

    #[serde(flatten)]
    pub languages: BTreeMap<String, LangConfig>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.base.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.base.root = Some(path.to_path_buf())
    }

    /// Configured language codes, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Whether `lang` has its own section.
    pub fn has_language(&self, lang: &str) -> bool {
        self.languages.contains_key(lang)
    }

    /// Options for one language, falling back to `[base]` for anything the
    /// language section leaves out.
    pub fn lang_options(&self, lang: &str) -> LangOptions {
        let base = &self.base;
        let section = self.languages.get(lang);

        let title = section
            .map(|s| s.title.clone())
            .unwrap_or_else(|| base.title.clone());
        let description = section
            .map(|s| s.description.clone())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| base.description.clone());
        let author = section
            .and_then(|s| s.author.clone())
            .unwrap_or_else(|| base.author.clone());
        let copyright = section
            .and_then(|s| s.copyright.clone())
            .or_else(|| base.copyright.clone())
            .unwrap_or_else(|| author.clone());
        let image_url = section
            .and_then(|s| s.image_url.clone())
            .or_else(|| base.image_url.clone());

        LangOptions {
            lang: lang.to_owned(),
            title,
            description,
            author,
            copyright,
            image_url,
            url: base.url.clone(),
        }
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.base.source_folder, cli.source.as_ref());
        Self::update_option(&mut self.base.public_folder, cli.output.as_ref());

        Self::update_option(&mut self.base.minify, cli.build_args().minify.as_ref());

        self.update_path_with_root(&root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all folders relative to the root directory
    fn update_path_with_root(&mut self, root: &Path, config: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config));
        self.base.source_folder = Self::normalize_path(&root.join(&self.base.source_folder));
        self.base.templates_folder =
            Self::normalize_path(&root.join(&self.base.templates_folder));
        self.base.public_folder = Self::normalize_path(&root.join(&self.base.public_folder));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the given build mode
    pub fn validate(&self, mode: BuildMode) -> Result<()> {
        if self.base.posts_per_page == 0 {
            bail!(ConfigError::Validation(
                "[base.posts_per_page] must be greater than 0".into()
            ));
        }

        if self.base.source_types.is_empty() {
            bail!(ConfigError::Validation(
                "[base.source_types] must have at least one element".into()
            ));
        }

        if !self.base.source_folder.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[base.source_folder] not found: {}",
                self.base.source_folder.display()
            )));
        }

        if let Some(url) = &self.base.url
            && !url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        if mode == BuildMode::Blog && self.base.url.is_none() {
            bail!(ConfigError::Validation(
                "[base.url] is required for blog builds, feeds link to it".into()
            ));
        }

        if mode == BuildMode::Blog && self.languages.is_empty() {
            bail!(ConfigError::Validation(
                "blog build requires at least one language section, e.g. [en]".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
