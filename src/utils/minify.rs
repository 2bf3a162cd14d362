//! Minification of written pages.
//!
//! HTML goes through `minify_html`; feeds only lose indentation and blank lines.

use std::borrow::Cow;

/// Content type for minification.
pub enum MinifyType<'a> {
    Html(&'a [u8]),
    Xml(&'a [u8]),
}

impl<'a> MinifyType<'a> {
    /// Pick the content type from the output file extension.
    pub fn for_path(path: &std::path::Path, content: &'a [u8]) -> Self {
        if path.extension().is_some_and(|ext| ext == "xml") {
            MinifyType::Xml(content)
        } else {
            MinifyType::Html(content)
        }
    }
}

/// Minify content when `enabled`.
///
/// Returns `Cow::Borrowed` if minify disabled, `Cow::Owned` if minified.
pub fn minify(content: MinifyType<'_>, enabled: bool) -> Cow<'_, [u8]> {
    match (content, enabled) {
        (MinifyType::Html(html), false) => Cow::Borrowed(html),
        (MinifyType::Xml(xml), false) => Cow::Borrowed(xml),
        (MinifyType::Html(html), true) => Cow::Owned(minify_html_inner(html)),
        (MinifyType::Xml(xml), true) => Cow::Owned(minify_xml_inner(xml)),
    }
}

fn minify_html_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    minify_html::minify(html, &cfg)
}

fn minify_xml_inner(xml: &[u8]) -> Vec<u8> {
    String::from_utf8_lossy(xml)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("")
        .into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_minify_html() {
        let html = b"<html>\n  <body>\n    <p>Hello World</p>\n  </body>\n</html>";

        let minified = minify(MinifyType::Html(html), true);
        let untouched = minify(MinifyType::Html(html), false);

        assert!(minified.len() < untouched.len());
        assert!(String::from_utf8_lossy(&minified).contains("<p>Hello World</p>"));
        assert_eq!(&*untouched, html);
    }

    #[test]
    fn test_minify_rss() {
        let xml = br#"<?xml version="1.0" encoding="utf-8"?>
<rss version="2.0">
  <channel>
    <title>Blog</title>

    <item>
      <title>Post</title>
    </item>
  </channel>
</rss>"#;
        let result = minify(MinifyType::Xml(xml), true);

        assert_eq!(
            &*result,
            br#"<?xml version="1.0" encoding="utf-8"?><rss version="2.0"><channel><title>Blog</title><item><title>Post</title></item></channel></rss>"#
        );
    }

    #[test]
    fn test_for_path() {
        assert!(matches!(
            MinifyType::for_path(Path::new("en/feed.xml"), b""),
            MinifyType::Xml(_)
        ));
        assert!(matches!(
            MinifyType::for_path(Path::new("en/index.html"), b""),
            MinifyType::Html(_)
        ));
    }
}
