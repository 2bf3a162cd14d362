//! RSS 2.0 output for feed pages.

use crate::{page::Feed, source::Document, utils::date::DateTimeUtc};
use anyhow::{Result, anyhow};
use chrono::Utc;
use regex::Regex;
use rss::{ChannelBuilder, GuidBuilder, ImageBuilder, ItemBuilder, validation::Validate};
use std::sync::LazyLock;

/// Render one language's feed to xml.
///
/// `lang` becomes the channel language; item links are absolute against the
/// feed link.
pub fn render_feed(feed: &Feed, lang: &str, author: &str) -> Result<String> {
    let site = feed
        .link
        .as_deref()
        .ok_or_else(|| anyhow!("feeds need an absolute `url` in [base]"))?
        .trim_end_matches('/');
    let link = format!("{site}/{lang}");
    let author = normalize_author(author);

    let items: Vec<_> = feed
        .items
        .iter()
        .map(|document| document_to_item(document, site, author.as_deref()))
        .collect();

    let image = feed.image_url.as_deref().map(|url| {
        ImageBuilder::default()
            .url(absolute_url(site, url))
            .title(feed.title.clone())
            .link(link.clone())
            .build()
    });

    let channel = ChannelBuilder::default()
        .title(feed.title.clone())
        .link(link)
        .description(feed.description.clone())
        .language(Some(lang.to_owned()))
        .copyright(Some(feed.copyright.clone()))
        .image(image)
        .generator(Some(env!("CARGO_PKG_NAME").to_owned()))
        .last_build_date(Some(Utc::now().to_rfc2822()))
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("rss validation failed: {e}"))?;
    Ok(channel.to_string())
}

fn document_to_item(document: &Document, site: &str, author: Option<&str>) -> rss::Item {
    let link = absolute_url(site, &document.url);
    let pub_date = document
        .date
        .as_deref()
        .and_then(DateTimeUtc::parse)
        .map(DateTimeUtc::to_rfc2822);
    let description = document
        .excerpt
        .clone()
        .unwrap_or_else(|| document.content.clone());

    ItemBuilder::default()
        .title(document.title.clone())
        .link(Some(link.clone()))
        .guid(Some(GuidBuilder::default().permalink(true).value(link).build()))
        .description(Some(description))
        .pub_date(pub_date)
        .author(author.map(str::to_owned))
        .categories(
            document
                .tags
                .iter()
                .map(|tag| rss::CategoryBuilder::default().name(tag.clone()).build())
                .collect::<Vec<_>>(),
        )
        .build()
}

fn absolute_url(site: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_owned()
    } else {
        format!("{site}/{}", url.trim_start_matches('/'))
    }
}

/// RSS wants `email@example.com (Name)`; anything else is left out.
fn normalize_author(author: &str) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$")
            .expect("valid author regex")
    });

    RE_VALID_AUTHOR
        .is_match(author.trim())
        .then(|| author.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(items: Vec<Document>) -> Feed {
        Feed {
            title: "Blog".into(),
            description: "Notes".into(),
            copyright: "Me".into(),
            image_url: Some("/images/logo.png".into()),
            link: Some("https://example.com/".into()),
            items,
        }
    }

    fn post(url: &str, date: &str) -> Document {
        let mut doc = Document::for_tests(url, "en").with_tags(&["css"]);
        doc.date = Some(date.to_owned());
        doc.content = "<p>Full</p>".into();
        doc.excerpt = Some("<p>Teaser</p>".into());
        doc
    }

    #[test]
    fn test_render_feed() {
        let xml = render_feed(
            &feed(vec![post("/en/hello", "2015-03-17T09:30:15Z")]),
            "en",
            "me@example.com (Me)",
        )
        .unwrap();

        assert!(xml.contains("<title>Blog</title>"));
        assert!(xml.contains("<link>https://example.com/en</link>"));
        assert!(xml.contains("<language>en</language>"));
        assert!(xml.contains("<link>https://example.com/en/hello</link>"));
        assert!(xml.contains("<pubDate>Tue, 17 Mar 2015 09:30:15 +0000</pubDate>"));
        assert!(xml.contains("Teaser"));
        assert!(!xml.contains("Full"));
        assert!(xml.contains("https://example.com/images/logo.png"));
        assert!(xml.contains("<author>me@example.com (Me)</author>"));
        assert!(xml.contains("<category>css</category>"));
    }

    #[test]
    fn test_render_feed_empty() {
        let xml = render_feed(&feed(Vec::new()), "ru", "Артём").unwrap();
        assert!(xml.contains("<channel>"));
        assert!(!xml.contains("<item>"));
        assert!(!xml.contains("<author>"));
    }

    #[test]
    fn test_render_feed_requires_link() {
        let mut f = feed(Vec::new());
        f.link = None;
        assert!(render_feed(&f, "en", "Me").is_err());
    }

    #[test]
    fn test_normalize_author() {
        assert_eq!(
            normalize_author("a@b.com (A)").as_deref(),
            Some("a@b.com (A)")
        );
        assert_eq!(normalize_author("Just A Name"), None);
    }
}
