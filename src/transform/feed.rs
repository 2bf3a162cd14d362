//! Per-language feed pages.

use crate::{config::LangOptions, page::Page, source::Document};

/// A feed page holding the first `posts_in_feed` documents.
///
/// `documents` must already be ordered newest first.
pub fn build_feed(options: &LangOptions, documents: &[Document], posts_in_feed: usize) -> Page {
    let items = documents.iter().take(posts_in_feed).cloned().collect();
    Page::feed(options, items)
}
