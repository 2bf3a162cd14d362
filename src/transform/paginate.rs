//! Splitting an ordered document list into listing pages.

use crate::{
    page::{Layout, Listing, Page, PageBody, Pagination},
    source::Document,
};
use anyhow::{Result, bail};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Where and how to emit one paginated listing.
#[derive(Debug, Clone)]
pub struct PaginateOptions {
    /// e.g. `en` or `en/tags/css`
    pub source_path_prefix: String,
    /// Url of page 1, e.g. `/en`; page N lives at `{url_prefix}/page/N`
    pub url_prefix: String,
    pub documents_per_page: usize,
    pub layout: Layout,
    pub lang: Option<String>,
    pub title: Option<String>,
    pub extra: Map<String, Value>,
}

impl PaginateOptions {
    fn page_url(&self, number: usize) -> String {
        let prefix = self.url_prefix.trim_end_matches('/');
        match number {
            1 if prefix.is_empty() => "/".to_owned(),
            1 => prefix.to_owned(),
            n => format!("{prefix}/page/{n}"),
        }
    }

    fn page_source_path(&self, number: usize) -> PathBuf {
        let prefix = self.source_path_prefix.trim_matches('/');
        match (prefix.is_empty(), number) {
            (true, 1) => PathBuf::from("index"),
            (true, n) => PathBuf::from(format!("page/{n}")),
            (false, 1) => PathBuf::from(prefix),
            (false, n) => PathBuf::from(format!("{prefix}/page/{n}")),
        }
    }
}

/// Split `documents` into sequential windows of `documents_per_page`.
///
/// Order is preserved and only the last page may be short. An empty list
/// still yields one empty page so listing urls always resolve.
pub fn paginate(documents: &[Document], options: &PaginateOptions) -> Result<Vec<Page>> {
    let per_page = options.documents_per_page;
    if per_page == 0 {
        bail!("documents per page must be greater than zero");
    }

    let chunks: Vec<&[Document]> = if documents.is_empty() {
        vec![documents]
    } else {
        documents.chunks(per_page).collect()
    };
    let total_pages = chunks.len();

    let pages = chunks
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| {
            let page_number = index + 1;
            Page {
                source_path: options.page_source_path(page_number),
                url: options.page_url(page_number),
                layout: options.layout.clone(),
                lang: options.lang.clone(),
                title: options.title.clone(),
                extra: options.extra.clone(),
                body: PageBody::Listing(Listing {
                    documents: chunk.to_vec(),
                    pagination: Pagination {
                        page_number,
                        total_pages,
                        previous_url: (page_number > 1).then(|| options.page_url(page_number - 1)),
                        next_url: (page_number < total_pages)
                            .then(|| options.page_url(page_number + 1)),
                    },
                }),
            }
        })
        .collect();

    Ok(pages)
}
