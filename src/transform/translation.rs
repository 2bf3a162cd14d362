//! Translation links between language versions of a post.
//!
//! `/en/blog/hello` and `/ru/blog/hello` are translations of each other: they
//! share the url left after stripping the language segment.

use crate::source::Document;
use std::collections::{BTreeMap, HashSet};

/// Strip the leading `/{lang}` segment from a url.
///
/// Urls outside the language folder are returned unchanged.
pub fn strip_lang_prefix<'a>(url: &'a str, lang: &str) -> &'a str {
    match url.strip_prefix('/').and_then(|rest| rest.strip_prefix(lang)) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => url,
    }
}

/// Set `translation` on every document that has a counterpart with the same
/// stripped url in any other language group.
///
/// A site with a single language simply gets no translations.
pub fn annotate_translations(groups: &mut BTreeMap<String, Vec<Document>>) {
    let stripped: BTreeMap<String, HashSet<String>> = groups
        .iter()
        .map(|(lang, documents)| {
            let urls = documents
                .iter()
                .map(|d| strip_lang_prefix(&d.url, lang).to_owned())
                .collect();
            (lang.clone(), urls)
        })
        .collect();

    for (lang, documents) in groups.iter_mut() {
        for document in documents.iter_mut() {
            let url = strip_lang_prefix(&document.url, lang);
            document.translation = stripped
                .iter()
                .filter(|(other, _)| *other != lang)
                .any(|(_, urls)| urls.contains(url));
        }
    }
}
