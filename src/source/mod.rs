//! Source discovery and loading.
//!
//! ```text
//! source/en/blog/hello.md
//!     │
//!     ├── front_matter::split() ──► yaml + body
//!     ├── front_matter::parse() ──► Fields
//!     ├── FieldParsers::apply() ──► timestamp, date
//!     ├── renderer for `md`     ──► content html (+ excerpt before cut tag)
//!     │
//!     ▼
//! Document { url: "/en/blog/hello", lang: "en", ... }
//! ```

mod document;
mod fields;
mod front_matter;

pub use document::{Document, Fields};
pub use fields::FieldParsers;

use crate::{
    error::BuildError, log, page::Layout, render::markdown, utils::slug::url_from_source_path,
};
use anyhow::{Result, anyhow};
use rayon::prelude::*;
use regex::Regex;
use serde_json::Value;
use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};
use walkdir::WalkDir;

/// Turns a raw body into HTML.
pub type BodyRenderer = fn(&str) -> String;

/// How sources are turned into documents.
#[derive(Clone)]
pub struct SourceOptions {
    /// Renderer per file extension; extensions without one pass through as-is
    pub renderers: BTreeMap<String, BodyRenderer>,
    pub field_parsers: FieldParsers,
    pub cut_tag: String,
    /// Language of documents outside a language folder
    pub default_lang: String,
    /// Folder names recognized as language prefixes
    pub languages: Vec<String>,
}

impl Default for SourceOptions {
    fn default() -> Self {
        let mut renderers: BTreeMap<String, BodyRenderer> = BTreeMap::new();
        renderers.insert("md".into(), markdown::render);
        Self {
            renderers,
            field_parsers: FieldParsers::new(),
            cut_tag: String::new(),
            default_lang: "en".into(),
            languages: Vec::new(),
        }
    }
}

/// Load every file under `folder` whose extension is in `types`.
///
/// Documents come back in path order. Drafts (`draft: true`) are skipped.
pub fn load_source_files(
    folder: &Path,
    types: &[String],
    options: &SourceOptions,
) -> Result<Vec<Document>> {
    let files = collect_source_files(folder, types)?;

    let documents = files
        .par_iter()
        .map(|path| load_document(folder, path, options))
        .collect::<Result<Vec<_>>>()?;

    let documents: Vec<_> = documents.into_iter().flatten().collect();
    let drafts = files.len() - documents.len();
    if drafts > 0 {
        log!("source"; "skipped {} drafts", drafts);
    }

    Ok(documents)
}

/// Source files under `folder`, sorted by path.
fn collect_source_files(folder: &Path, types: &[String]) -> Result<Vec<PathBuf>> {
    let types: HashSet<&str> = types.iter().map(|t| t.trim_start_matches('.')).collect();

    let mut files = Vec::new();
    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = entry.map_err(|err| BuildError::SourceLoad {
            path: err.path().unwrap_or(folder).to_path_buf(),
            source: err.into(),
        })?;
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| types.contains(ext));
        if entry.file_type().is_file() && matches {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

/// Load one document; `Ok(None)` for drafts.
fn load_document(root: &Path, path: &Path, options: &SourceOptions) -> Result<Option<Document>> {
    let raw = fs::read_to_string(path).map_err(|err| BuildError::SourceLoad {
        path: path.to_path_buf(),
        source: err.into(),
    })?;
    let relative = path
        .strip_prefix(root)
        .map_err(|_| anyhow!("{} is not in {}", path.display(), root.display()))?
        .to_path_buf();

    let front_matter_error = |source: anyhow::Error| BuildError::FrontMatter {
        path: relative.clone(),
        source,
    };

    let (yaml, body) = front_matter::split(&raw);
    let mut fields = match yaml {
        Some(yaml) => front_matter::parse(yaml).map_err(front_matter_error)?,
        None => Fields::new(),
    };
    if fields.get("draft").and_then(Value::as_bool) == Some(true) {
        return Ok(None);
    }
    options
        .field_parsers
        .apply(&mut fields)
        .map_err(front_matter_error)?;

    let extension = relative
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let content = match options.renderers.get(extension) {
        Some(render) => render(body),
        None => body.to_owned(),
    };
    let excerpt = excerpt(&content, &options.cut_tag);

    let url = match fields.remove("url") {
        Some(Value::String(url)) => format!("/{}", url.trim_matches('/')),
        _ => url_from_source_path(&relative),
    };
    let lang = match fields.remove("lang") {
        Some(Value::String(lang)) => lang,
        _ => lang_from_url(&url, &options.languages).unwrap_or_else(|| options.default_lang.clone()),
    };

    Ok(Some(Document {
        title: take_string(&mut fields, "title"),
        layout: take_string(&mut fields, "layout")
            .map_or(Layout::Post, |name| Layout::from_name(&name)),
        tags: take_tags(&mut fields),
        date: take_string(&mut fields, "date"),
        timestamp: fields.remove("timestamp").and_then(|v| v.as_i64()),
        source_path: relative,
        url,
        lang,
        content,
        excerpt,
        translation: false,
        fields,
    }))
}

/// Rendered content before the cut tag, if the document has one.
fn excerpt(content: &str, cut_tag: &str) -> Option<String> {
    if cut_tag.is_empty() {
        return None;
    }
    content
        .find(cut_tag)
        .map(|pos| content[..pos].trim_end().to_owned())
}

/// Language from the first url segment.
///
/// Configured languages always match. Any other folder counts only when it
/// holds documents and is named like a language code (`de`, `pt-BR`); the
/// blog build then warns that it has no config section.
fn lang_from_url(url: &str, languages: &[String]) -> Option<String> {
    static LANG_CODE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[a-z]{2}(-[A-Z]{2})?$").expect("valid language regex"));

    let mut segments = url.trim_start_matches('/').split('/');
    let first = segments.next().filter(|s| !s.is_empty())?;
    if languages.iter().any(|lang| lang == first) {
        return Some(first.to_owned());
    }
    (segments.next().is_some() && LANG_CODE.is_match(first)).then(|| first.to_owned())
}

fn take_string(fields: &mut Fields, name: &str) -> Option<String> {
    match fields.remove(name)? {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Tags from a list or a comma-separated string, de-duplicated.
fn take_tags(fields: &mut Fields) -> Vec<String> {
    let raw: Vec<String> = match fields.remove("tags") {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Some(Value::String(s)) => s.split(',').map(str::to_owned).collect(),
        _ => Vec::new(),
    };

    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|tag| tag.trim().to_owned())
        .filter(|tag| !tag.is_empty() && seen.insert(tag.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn blog_options() -> SourceOptions {
        SourceOptions {
            field_parsers: FieldParsers::blog(),
            cut_tag: "<!-- cut -->".into(),
            languages: vec!["en".into(), "ru".into()],
            ..SourceOptions::default()
        }
    }

    fn types() -> Vec<String> {
        vec!["md".into(), "html".into()]
    }

    #[test]
    fn test_load_blog_post() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "en/blog/hello.md",
            "---\ntitle: Hello\ndate: 2015-03-17\ntags: [css, js, css]\ncover: /a.png\n---\nTeaser.\n\n<!-- cut -->\n\nMore.",
        );

        let docs = load_source_files(dir.path(), &types(), &blog_options()).unwrap();
        assert_eq!(docs.len(), 1);
        let doc = &docs[0];

        assert_eq!(doc.url, "/en/blog/hello");
        assert_eq!(doc.source_path, PathBuf::from("en/blog/hello.md"));
        assert_eq!(doc.lang, "en");
        assert_eq!(doc.title.as_deref(), Some("Hello"));
        assert_eq!(doc.layout, Layout::Post);
        assert_eq!(doc.tags, vec!["css", "js"]);
        assert_eq!(doc.timestamp, Some(1_426_550_400));
        assert_eq!(doc.date.as_deref(), Some("2015-03-17T00:00:00Z"));
        assert_eq!(doc.excerpt.as_deref(), Some("<p>Teaser.</p>"));
        assert!(doc.content.contains("<p>More.</p>"));
        assert_eq!(doc.fields["cover"], serde_json::json!("/a.png"));
        assert!(!doc.fields.contains_key("title"));
        assert!(!doc.translation);
    }

    #[test]
    fn test_load_filters_types_and_sorts() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.md", "B");
        write(dir.path(), "a.html", "<p>A</p>");
        write(dir.path(), "notes.txt", "ignored");
        write(dir.path(), "sub/index.md", "---\nlayout: page\n---\nSub");

        let docs = load_source_files(dir.path(), &types(), &SourceOptions::default()).unwrap();
        let urls: Vec<_> = docs.iter().map(|d| d.url.as_str()).collect();

        assert_eq!(urls, vec!["/a", "/b", "/sub"]);
        assert_eq!(docs[0].content, "<p>A</p>");
        assert_eq!(docs[1].content, "<p>B</p>\n");
        assert_eq!(docs[2].layout, Layout::Custom("page".into()));
    }

    #[test]
    fn test_lang_resolution() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "ru/post.md", "Привет");
        write(dir.path(), "about.md", "About");
        write(dir.path(), "misc/en.md", "---\nlang: ru\n---\nOverride");

        let docs = load_source_files(dir.path(), &types(), &blog_options()).unwrap();
        let langs: Vec<_> = docs.iter().map(|d| (d.url.as_str(), d.lang.as_str())).collect();

        assert_eq!(
            langs,
            vec![("/about", "en"), ("/misc/en", "ru"), ("/ru/post", "ru")]
        );
    }

    #[test]
    fn test_unconfigured_language_folder() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "de/post.md", "Hallo");
        write(dir.path(), "pt-BR/post.md", "Olá");
        write(dir.path(), "blog/post.md", "Post");
        write(dir.path(), "de.md", "Root page named de");

        let docs = load_source_files(dir.path(), &types(), &blog_options()).unwrap();
        let langs: Vec<_> = docs.iter().map(|d| (d.url.as_str(), d.lang.as_str())).collect();

        assert_eq!(
            langs,
            vec![
                ("/blog/post", "en"),
                ("/de/post", "de"),
                ("/de", "en"),
                ("/pt-BR/post", "pt-BR"),
            ]
        );
    }

    #[test]
    fn test_drafts_are_skipped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "en/draft.md", "---\ndraft: true\n---\nWIP");
        write(dir.path(), "en/done.md", "---\ndraft: false\n---\nDone");

        let docs = load_source_files(dir.path(), &types(), &blog_options()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].url, "/en/done");
    }

    #[test]
    fn test_front_matter_url_override() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "en/2015-hello.md", "---\nurl: en/hello/\n---\nHi");

        let docs = load_source_files(dir.path(), &types(), &blog_options()).unwrap();
        assert_eq!(docs[0].url, "/en/hello");
    }

    #[test]
    fn test_bad_front_matter_reports_path() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "en/broken.md", "---\ntitle: [oops\n---\nBody");

        let err = load_source_files(dir.path(), &types(), &blog_options()).unwrap_err();
        assert!(err.to_string().contains("en/broken.md"));
    }

    #[test]
    fn test_bad_date_reports_path() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "en/undated.md", "---\ndate: tomorrow\n---\nBody");

        let err = load_source_files(dir.path(), &types(), &blog_options()).unwrap_err();
        assert!(err.to_string().contains("en/undated.md"));
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("<p>a</p>\n<!-- cut -->\n<p>b</p>", "<!-- cut -->").as_deref(), Some("<p>a</p>"));
        assert_eq!(excerpt("<p>a</p>", "<!-- cut -->"), None);
        assert_eq!(excerpt("<p>a</p>", ""), None);
    }

    #[test]
    fn test_take_tags_from_string() {
        let mut fields = Fields::new();
        fields.insert("tags".into(), Value::from("css, js , ,css"));
        assert_eq!(take_tags(&mut fields), vec!["css", "js"]);
    }
}
