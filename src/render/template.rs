//! Page templates.
//!
//! Every `*.html` file under the templates folder is registered under its
//! path relative to that folder, so layout `post` renders `post.html`.

use crate::utils::slug::slugify;
use anyhow::{Context as _, Result, bail};
use serde::Serialize;
use std::{collections::HashMap, path::Path};
use tera::{Context, Tera, Value};

pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Load every template below `folder`.
    pub fn from_folder(folder: &Path) -> Result<Self> {
        if !folder.is_dir() {
            bail!("templates folder `{}` not found", folder.display());
        }

        let glob = folder.join("**").join("*.html");
        let glob = glob.to_string_lossy();
        let tera = Tera::new(&glob)
            .with_context(|| format!("failed to load templates from `{}`", folder.display()))?;
        Ok(Self::with_filters(tera))
    }

    /// Build a renderer from in-memory `(name, source)` pairs.
    #[cfg(test)]
    pub fn from_raw(templates: &[(&str, &str)]) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates.iter().copied())?;
        Ok(Self::with_filters(tera))
    }

    fn with_filters(mut tera: Tera) -> Self {
        tera.register_filter("tag_slug", tag_slug);
        Self { tera }
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Render template `name` with `context` as its top-level variables.
    pub fn render(&self, name: &str, context: &impl Serialize) -> Result<String> {
        if !self.has_template(name) {
            bail!("template `{name}` not found");
        }
        let context = Context::from_serialize(context)?;
        let html = self.tera.render(name, &context)?;
        Ok(html)
    }
}

/// `{{ tag | tag_slug }}`, the same slug tag page urls use.
fn tag_slug(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    value
        .as_str()
        .map(|tag| Value::from(slugify(tag)))
        .ok_or_else(|| tera::Error::msg("tag_slug expects a string"))
}
