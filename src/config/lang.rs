//! Per-language sections (`[en]`, `[ru]`, ...).

use serde::{Deserialize, Serialize};

/// A language section in config.toml.
///
/// ```toml
/// [ru]
/// title = "Блог"
/// description = "Заметки о вёрстке"
/// author = "Артём"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LangConfig {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub copyright: Option<String>,

    #[serde(default, alias = "imageUrl")]
    pub image_url: Option<String>,
}

/// Options visible to one language: the language section layered over `[base]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LangOptions {
    pub lang: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub copyright: String,
    pub image_url: Option<String>,
    pub url: Option<String>,
}
