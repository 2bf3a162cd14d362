//! Markdown → HTML for document bodies.

use pulldown_cmark::{Options, Parser, html::push_html};

/// Render markdown to HTML.
///
/// GFM tables, strikethrough, task lists and footnotes are enabled. Raw HTML,
/// including the cut tag comment, passes through unchanged.
pub fn render(text: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_HEADING_ATTRIBUTES;

    let parser = Parser::new_ext(text, options);
    let mut html = String::with_capacity(text.len() * 3 / 2);
    push_html(&mut html, parser);
    html
}
