//! Page generation: pages in, rendered files out.
//!
//! HTML pages go through the template named after their layout, feed pages
//! through [`rss::render_feed`]. Rendering runs in parallel and keeps the
//! input order.

pub mod rss;

use crate::{
    config::{BaseConfig, LangOptions, SiteConfig},
    error::BuildError,
    logger::ProgressBars,
    page::{Layout, Page},
    render::TemplateRenderer,
};
use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;

/// A page ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub url: String,
    pub content: String,
}

/// Variables every template sees.
#[derive(Serialize)]
struct TemplateContext<'a> {
    page: &'a Page,
    /// Language options, when the page has a language
    config: Option<LangOptions>,
    site: &'a BaseConfig,
}

pub fn generate_pages(
    pages: &[Page],
    config: &SiteConfig,
    renderer: &TemplateRenderer,
) -> Result<Vec<RenderedPage>, BuildError> {
    let progress = ProgressBars::new(&[("render", pages.len())]);

    let rendered: Result<Vec<_>, BuildError> = pages
        .par_iter()
        .map(|page| {
            let content = render_page(page, config, renderer).map_err(|source| {
                BuildError::Render {
                    path: page.source_path.clone(),
                    source,
                }
            })?;
            progress.inc("render");
            Ok::<_, BuildError>(RenderedPage {
                url: page.url.clone(),
                content,
            })
        })
        .collect();

    progress.finish();
    rendered
}

fn render_page(page: &Page, config: &SiteConfig, renderer: &TemplateRenderer) -> Result<String> {
    let options = page.lang.as_deref().map(|lang| config.lang_options(lang));

    if let (Layout::Feed, Some(feed)) = (&page.layout, page.feed_body()) {
        let lang = page.lang.as_deref().unwrap_or(&config.base.lang);
        let author = options
            .as_ref()
            .map_or(config.base.author.as_str(), |o| o.author.as_str());
        return rss::render_feed(feed, lang, author);
    }

    let context = TemplateContext {
        page,
        config: options,
        site: &config.base,
    };
    renderer.render(&page.layout.template(), &context)
}
