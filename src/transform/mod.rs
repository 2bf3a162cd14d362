//! Blog pipeline: documents in, pages out.
//!
//! Runs after the loader and before the generator:
//!
//! 1. order by `-timestamp`
//! 2. group by `lang` and annotate translations
//! 3. per language (sorted): document pages, index pages, tag pages, feed

pub mod feed;
pub mod group;
pub mod order;
pub mod paginate;
pub mod translation;

use crate::{
    config::SiteConfig,
    log,
    page::{Layout, Page, ensure_unique_urls},
    source::Document,
    utils::slug::slugify,
};
use anyhow::Result;
use paginate::{PaginateOptions, paginate};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Turn loaded documents into the full blog page collection.
pub fn build_blog_pages(documents: Vec<Document>, config: &SiteConfig) -> Result<Vec<Page>> {
    let ordered = order::order_documents(documents, &["-timestamp"]);
    let mut by_lang = group::group_documents(&ordered, "lang");
    translation::annotate_translations(&mut by_lang);

    let mut pages = Vec::new();
    for (lang, documents) in &by_lang {
        if !config.has_language(lang) {
            log!("warn"; "no [{lang}] section in config, falling back to [base]");
        }

        let before = pages.len();
        pages.extend(documents.iter().cloned().map(Page::from_document));
        pages.extend(index_pages(lang, documents, config)?);
        pages.extend(tag_pages(lang, documents, config)?);

        let options = config.lang_options(lang);
        pages.push(feed::build_feed(&options, documents, config.base.posts_in_feed));

        log!("blog"; "{lang}: {} documents, {} pages", documents.len(), pages.len() - before);
    }

    ensure_unique_urls(&pages)?;
    Ok(pages)
}

/// `/{lang}`, `/{lang}/page/2`, ...
fn index_pages(lang: &str, documents: &[Document], config: &SiteConfig) -> Result<Vec<Page>> {
    let options = PaginateOptions {
        source_path_prefix: lang.to_owned(),
        url_prefix: format!("/{lang}"),
        documents_per_page: config.base.posts_per_page,
        layout: Layout::Index,
        lang: Some(lang.to_owned()),
        title: Some(config.lang_options(lang).title),
        extra: extra("lang", lang),
    };
    paginate(documents, &options)
}

/// `/{lang}/tags/{slug}` for every tag used in this language.
fn tag_pages(lang: &str, documents: &[Document], config: &SiteConfig) -> Result<Vec<Page>> {
    let mut pages = Vec::new();
    for (slug, (tag, tagged)) in tags_by_slug(documents) {
        let options = PaginateOptions {
            source_path_prefix: format!("{lang}/tags/{slug}"),
            url_prefix: format!("/{lang}/tags/{slug}"),
            documents_per_page: config.base.posts_per_page,
            layout: Layout::Tag,
            lang: Some(lang.to_owned()),
            title: Some(tag.clone()),
            extra: extra("tag", &tag),
        };
        pages.extend(paginate(&tagged, &options)?);
    }
    Ok(pages)
}

/// Tags keyed by slug, so `CSS` and `css` share one page. The first spelling
/// seen names the page.
fn tags_by_slug(documents: &[Document]) -> BTreeMap<String, (String, Vec<Document>)> {
    let mut tags: BTreeMap<String, (String, Vec<Document>)> = BTreeMap::new();
    for document in documents {
        for tag in &document.tags {
            let (_, tagged) = tags
                .entry(slugify(tag))
                .or_insert_with(|| (tag.clone(), Vec::new()));
            if tagged
                .last()
                .is_none_or(|last| last.source_path != document.source_path)
            {
                tagged.push(document.clone());
            }
        }
    }
    tags
}

fn extra(key: &str, value: &str) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(key.to_owned(), Value::from(value));
    map
}
