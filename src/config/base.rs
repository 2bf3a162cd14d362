//! `[base]` section configuration.
//!
//! Folders, source types, blog listing sizes and site-wide metadata that
//! language sections fall back to.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[base]` section in config.toml.
///
/// Keys may be spelled in `snake_case` or `camelCase`.
///
/// # Example
/// ```toml
/// [base]
/// source_folder = "source"
/// public_folder = "public"
/// posts_per_page = 10
/// posts_in_feed = 20
/// cut_tag = "<!-- cut -->"
/// url = "https://example.com"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::base::root")]
    #[educe(Default = defaults::base::root())]
    pub root: Option<PathBuf>,

    /// Folder with markdown/html sources.
    #[serde(default = "defaults::base::source_folder", alias = "sourceFolder")]
    #[educe(Default = defaults::base::source_folder())]
    pub source_folder: PathBuf,

    /// Folder with tera templates, one per layout.
    #[serde(default = "defaults::base::templates_folder", alias = "templatesFolder")]
    #[educe(Default = defaults::base::templates_folder())]
    pub templates_folder: PathBuf,

    /// Output folder.
    #[serde(default = "defaults::base::public_folder", alias = "publicFolder")]
    #[educe(Default = defaults::base::public_folder())]
    pub public_folder: PathBuf,

    /// File extensions treated as sources (without the dot).
    #[serde(default = "defaults::base::source_types", alias = "sourceTypes")]
    #[educe(Default = defaults::base::source_types())]
    pub source_types: Vec<String>,

    /// Documents per index/tag listing page.
    #[serde(default = "defaults::base::posts_per_page", alias = "postsPerPage")]
    #[educe(Default = defaults::base::posts_per_page())]
    pub posts_per_page: usize,

    /// Number of newest documents in each rss feed.
    #[serde(default = "defaults::base::posts_in_feed", alias = "postsInFeed")]
    #[educe(Default = defaults::base::posts_in_feed())]
    pub posts_in_feed: usize,

    /// Marker separating the excerpt from the rest of a post.
    #[serde(default = "defaults::base::cut_tag", alias = "cutTag")]
    #[educe(Default = defaults::base::cut_tag())]
    pub cut_tag: String,

    /// Base URL for absolute links in feeds.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// Language of documents outside any language folder.
    #[serde(default = "defaults::base::lang")]
    #[educe(Default = defaults::base::lang())]
    pub lang: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    #[serde(default)]
    pub copyright: Option<String>,

    /// Channel image for rss feeds.
    #[serde(default, alias = "imageUrl")]
    pub image_url: Option<String>,

    /// Minify written html/xml.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub minify: bool,
}
