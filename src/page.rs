//! Output pages.
//!
//! A page is one output file. Natural pages wrap a single document; the blog
//! pipeline adds synthetic listing pages (index, tag) and feed pages.

use crate::{
    config::LangOptions, error::BuildError, source::Document, utils::slug::output_path_for_url,
};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

/// Template a page is rendered with.
///
/// Built-in layouts map to `post.html`, `index.html` and `tag.html`; `Feed`
/// is rendered to RSS directly. Front matter may name any other template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Layout {
    Post,
    Index,
    Tag,
    Feed,
    Custom(String),
}

impl Layout {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "post" => Self::Post,
            "index" => Self::Index,
            "tag" => Self::Tag,
            "feed" | "rss" => Self::Feed,
            _ => Self::Custom(name.trim().to_owned()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Post => "post",
            Self::Index => "index",
            Self::Tag => "tag",
            Self::Feed => "feed",
            Self::Custom(name) => name,
        }
    }

    /// Template file for this layout, relative to the templates folder.
    pub fn template(&self) -> String {
        format!("{}.html", self.name())
    }
}

impl Serialize for Layout {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Position of a listing page within its sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// 1-based
    pub page_number: usize,
    pub total_pages: usize,
    pub previous_url: Option<String>,
    pub next_url: Option<String>,
}

/// A slice of documents for an index or tag page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub documents: Vec<Document>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

/// Everything needed to render one language's rss feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feed {
    pub title: String,
    pub description: String,
    pub copyright: String,
    pub image_url: Option<String>,
    /// Absolute site url the feed links to, if configured
    pub link: Option<String>,
    pub items: Vec<Document>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PageBody {
    Document(Box<Document>),
    Listing(Listing),
    Feed(Feed),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub source_path: PathBuf,
    pub url: String,
    pub layout: Layout,
    pub lang: Option<String>,
    pub title: Option<String>,
    /// Free-form data for templates, e.g. `tag`
    pub extra: serde_json::Map<String, Value>,
    pub body: PageBody,
}

impl Page {
    /// The natural page of a document.
    pub fn from_document(document: Document) -> Self {
        Self {
            source_path: document.source_path.clone(),
            url: document.url.clone(),
            layout: document.layout.clone(),
            lang: Some(document.lang.clone()),
            title: document.title.clone(),
            extra: serde_json::Map::new(),
            body: PageBody::Document(Box::new(document)),
        }
    }

    /// A feed page for one language.
    pub fn feed(options: &LangOptions, items: Vec<Document>) -> Self {
        let lang = &options.lang;
        Self {
            source_path: PathBuf::from(format!("{lang}/feed.xml")),
            url: format!("/{lang}/feed.xml"),
            layout: Layout::Feed,
            lang: Some(lang.clone()),
            title: Some(options.title.clone()),
            extra: serde_json::Map::new(),
            body: PageBody::Feed(Feed {
                title: options.title.clone(),
                description: options.description.clone(),
                copyright: options.copyright.clone(),
                image_url: options.image_url.clone(),
                link: options.url.clone(),
                items,
            }),
        }
    }

    #[cfg(test)]
    pub fn documents(&self) -> &[Document] {
        match &self.body {
            PageBody::Document(document) => std::slice::from_ref(document.as_ref()),
            PageBody::Listing(listing) => &listing.documents,
            PageBody::Feed(feed) => &feed.items,
        }
    }

    #[cfg(test)]
    pub fn pagination(&self) -> Option<&Pagination> {
        match &self.body {
            PageBody::Listing(listing) => Some(&listing.pagination),
            _ => None,
        }
    }

    /// Feed payload, for feed pages.
    pub fn feed_body(&self) -> Option<&Feed> {
        match &self.body {
            PageBody::Feed(feed) => Some(feed),
            _ => None,
        }
    }
}

/// Fail if two pages would be written to the same output file.
pub fn ensure_unique_urls(pages: &[Page]) -> Result<(), BuildError> {
    let mut seen: HashMap<PathBuf, &Page> = HashMap::with_capacity(pages.len());
    for page in pages {
        let target = output_path_for_url(Path::new(""), &page.url);
        if let Some(first) = seen.insert(target, page) {
            return Err(BuildError::DuplicateUrl {
                url: page.url.clone(),
                first: first.source_path.clone(),
                second: page.source_path.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_layout_names() {
        assert_eq!(Layout::from_name("Post"), Layout::Post);
        assert_eq!(Layout::from_name("index"), Layout::Index);
        assert_eq!(Layout::from_name("RSS"), Layout::Feed);
        assert_eq!(Layout::from_name("about"), Layout::Custom("about".into()));
        assert_eq!(Layout::Tag.template(), "tag.html");
        assert_eq!(Layout::Custom("about".into()).template(), "about.html");
    }

    #[test]
    fn test_from_document() {
        let doc = Document::for_tests("/en/blog/hello", "en");
        let page = Page::from_document(doc.clone());

        assert_eq!(page.url, "/en/blog/hello");
        assert_eq!(page.layout, Layout::Post);
        assert_eq!(page.lang.as_deref(), Some("en"));
        assert_eq!(page.documents(), &[doc]);
        assert!(page.pagination().is_none());
    }

    #[test]
    fn test_ensure_unique_urls() {
        let about = Page::from_document(Document::for_tests("/about", "en"));
        let hello = Page::from_document(Document::for_tests("/en/hello", "en"));
        assert!(ensure_unique_urls(&[about.clone(), hello]).is_ok());

        let mut clash = Page::from_document(Document::for_tests("/about", "en"));
        clash.source_path = PathBuf::from("about.html");
        let err = ensure_unique_urls(&[about, clash]).unwrap_err();
        assert!(matches!(
            &err,
            BuildError::DuplicateUrl { url, first, second }
                if url == "/about"
                    && first == Path::new("about.md")
                    && second == Path::new("about.html")
        ));
    }

    #[test]
    fn test_serialize_listing() {
        let page = Page {
            source_path: PathBuf::from("en/page2"),
            url: "/en/page/2".into(),
            layout: Layout::Index,
            lang: Some("en".into()),
            title: None,
            extra: serde_json::Map::new(),
            body: PageBody::Listing(Listing {
                documents: vec![Document::for_tests("/en/a", "en")],
                pagination: Pagination {
                    page_number: 2,
                    total_pages: 2,
                    previous_url: Some("/en".into()),
                    next_url: None,
                },
            }),
        };

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["layout"], json!("index"));
        assert_eq!(value["body"]["page_number"], json!(2));
        assert_eq!(value["body"]["previous_url"], json!("/en"));
        assert_eq!(value["body"]["documents"][0]["url"], json!("/en/a"));
    }
}
