//! Loaded source documents.

use crate::page::Layout;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// Front matter fields as JSON values.
pub type Fields = serde_json::Map<String, Value>;

/// A parsed source file.
///
/// Produced by the loader and immutable afterwards, except for the
/// `translation` flag set by the blog pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Path relative to the source folder, e.g. `en/blog/hello.md`
    pub source_path: PathBuf,
    /// e.g. `/en/blog/hello`
    pub url: String,
    pub lang: String,
    pub title: Option<String>,
    pub layout: Layout,
    /// Unique, in front matter order
    pub tags: Vec<String>,
    /// Normalized `YYYY-MM-DDTHH:MM:SSZ`, set by the `date` field parser
    pub date: Option<String>,
    /// Epoch seconds, set by the `timestamp` field parser
    pub timestamp: Option<i64>,
    /// Rendered body
    pub content: String,
    /// Rendered body before the cut tag
    pub excerpt: Option<String>,
    /// A document with the same url exists in another language
    pub translation: bool,
    /// Remaining front matter
    #[serde(flatten)]
    pub fields: Fields,
}

impl Document {
    /// Look up a field by name for ordering and grouping.
    ///
    /// Typed fields take precedence over raw front matter.
    pub fn field(&self, name: &str) -> Value {
        match name {
            "url" => Value::from(self.url.as_str()),
            "lang" => Value::from(self.lang.as_str()),
            "title" => self.title.as_deref().map_or(Value::Null, Value::from),
            "layout" => Value::from(self.layout.name()),
            "tags" => Value::from(self.tags.clone()),
            "date" => self.date.as_deref().map_or(Value::Null, Value::from),
            "timestamp" => self.timestamp.map_or(Value::Null, Value::from),
            "translation" => Value::from(self.translation),
            _ => self.fields.get(name).cloned().unwrap_or(Value::Null),
        }
    }

    /// Values used when grouping by `name`.
    ///
    /// Arrays yield one key per element, so a document tagged `[a, b]`
    /// lands in both groups. Missing fields yield no key.
    pub fn group_keys(&self, name: &str) -> Vec<String> {
        match self.field(name) {
            Value::Null => Vec::new(),
            Value::String(s) => vec![s],
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect(),
            other => vec![other.to_string()],
        }
    }

    #[cfg(test)]
    pub fn for_tests(url: &str, lang: &str) -> Self {
        Self {
            source_path: PathBuf::from(format!("{}.md", url.trim_start_matches('/'))),
            url: url.to_owned(),
            lang: lang.to_owned(),
            title: Some(url.to_owned()),
            layout: Layout::Post,
            tags: Vec::new(),
            date: None,
            timestamp: None,
            content: String::new(),
            excerpt: None,
            translation: false,
            fields: Fields::new(),
        }
    }

    #[cfg(test)]
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[cfg(test)]
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| (*t).to_owned()).collect();
        self
    }
}
