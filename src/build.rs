//! Build orchestration.
//!
//! ```text
//! build_site()
//!     │
//!     ├── load_source_files()  ──► documents
//!     ├── Site: one page per document
//!     │   Blog: build_blog_pages() ──► posts, index, tag and feed pages
//!     ├── generate_pages()     ──► rendered html / xml
//!     └── save_pages()         ──► public folder
//! ```

use crate::{
    config::SiteConfig,
    generator::generate_pages,
    log,
    page::{Page, ensure_unique_urls},
    render::TemplateRenderer,
    source::{FieldParsers, SourceOptions, load_source_files},
    transform::build_blog_pages,
    writer::save_pages,
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Which pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// One page per source file
    Site,
    /// Posts plus index pages, tag pages and feeds per language
    Blog,
}

/// Build the site into the public folder.
///
/// With `clean`, the public folder is removed first.
pub fn build_site(config: &SiteConfig, mode: BuildMode, clean: bool) -> Result<()> {
    let base = &config.base;
    let renderer = TemplateRenderer::from_folder(&base.templates_folder)?;

    let documents = load_source_files(
        &base.source_folder,
        &base.source_types,
        &source_options(config, mode),
    )?;
    log!("source"; "{} documents", documents.len());

    let pages = match mode {
        BuildMode::Site => {
            let pages: Vec<Page> = documents.into_iter().map(Page::from_document).collect();
            ensure_unique_urls(&pages)?;
            pages
        }
        BuildMode::Blog => build_blog_pages(documents, config)?,
    };

    let rendered = generate_pages(&pages, config, &renderer)?;
    log!("render"; "{} pages", rendered.len());

    prepare_output(&base.public_folder, clean)?;
    save_pages(&rendered, &base.public_folder, base.minify)?;

    log!("build"; "done");
    Ok(())
}

fn source_options(config: &SiteConfig, mode: BuildMode) -> SourceOptions {
    let field_parsers = match mode {
        BuildMode::Site => FieldParsers::new(),
        BuildMode::Blog => FieldParsers::blog(),
    };

    SourceOptions {
        field_parsers,
        cut_tag: config.base.cut_tag.clone(),
        default_lang: config.base.lang.clone(),
        languages: config.languages().map(str::to_owned).collect(),
        ..SourceOptions::default()
    }
}

fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn setup() -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        write(
            root,
            "templates/post.html",
            "<h1>{{ page.title }}</h1>{{ page.body.content | safe }}",
        );
        write(
            root,
            "templates/index.html",
            "{{ config.title }}:{% for doc in page.body.documents %} {{ doc.url | safe }}{% endfor %}",
        );
        write(root, "templates/tag.html", "#{{ page.extra.tag }}");
        write(
            root,
            "source/en/blog/first.md",
            "---\ntitle: First\ndate: 2015-03-17\ntags: [css]\n---\nOne <!-- cut --> more",
        );
        write(
            root,
            "source/en/blog/second.md",
            "---\ntitle: Second\ndate: 2015-03-18 10:00\n---\n# Two",
        );
        write(
            root,
            "source/ru/blog/first.md",
            "---\ntitle: Первый\ndate: 2015-03-17\n---\nОдин",
        );
        write(
            root,
            "source/en/blog/wip.md",
            "---\ntitle: WIP\ndate: 2015-03-19\ndraft: true\n---\nSoon",
        );

        let mut config = SiteConfig::from_str(
            r#"
            [base]
            url = "https://example.com"
            posts_per_page = 1

            [en]
            title = "Blog"

            [ru]
            title = "Блог"
            "#,
        )
        .unwrap();
        config.base.source_folder = root.join("source");
        config.base.templates_folder = root.join("templates");
        config.base.public_folder = root.join("public");

        (dir, config)
    }

    fn public(config: &SiteConfig, relative: &str) -> PathBuf {
        config.base.public_folder.join(relative)
    }

    #[test]
    fn test_build_blog() {
        let (_dir, config) = setup();
        build_site(&config, BuildMode::Blog, false).unwrap();

        let read = |p: &str| fs::read_to_string(public(&config, p)).unwrap();
        assert!(read("en/blog/first/index.html").contains("<h1>First</h1>"));
        assert_eq!(read("en/index.html"), "Blog: /en/blog/second");
        assert_eq!(read("en/page/2/index.html"), "Blog: /en/blog/first");
        assert_eq!(read("en/tags/css/index.html"), "#css");
        assert_eq!(read("ru/index.html"), "Блог: /ru/blog/first");

        let feed = read("en/feed.xml");
        assert!(feed.contains("https://example.com/en/blog/second"));
        assert!(read("ru/feed.xml").contains("<language>ru</language>"));

        assert!(!public(&config, "en/blog/wip").exists());
    }

    #[test]
    fn test_build_site_mode() {
        let (_dir, config) = setup();
        build_site(&config, BuildMode::Site, false).unwrap();

        assert!(public(&config, "en/blog/second/index.html").exists());
        assert!(public(&config, "ru/blog/first/index.html").exists());
        assert!(!public(&config, "en/index.html").exists());
        assert!(!public(&config, "en/feed.xml").exists());
    }

    #[test]
    fn test_build_clean() {
        let (_dir, config) = setup();
        write(&config.base.public_folder, "stale.html", "old");

        build_site(&config, BuildMode::Site, false).unwrap();
        assert!(public(&config, "stale.html").exists());

        build_site(&config, BuildMode::Site, true).unwrap();
        assert!(!public(&config, "stale.html").exists());
        assert!(public(&config, "en/blog/first/index.html").exists());
    }

    #[test]
    fn test_build_rejects_post_on_index_url() {
        let (_dir, config) = setup();
        write(
            &config.base.source_folder,
            "en/index.md",
            "---\ntitle: Home\ndate: 2015-03-20\n---\nHi",
        );

        let err = build_site(&config, BuildMode::Blog, false).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("en/index.md"), "{message}");
        assert!(message.contains("`/en`"), "{message}");
        assert!(!public(&config, "en/index.html").exists());
    }

    #[test]
    fn test_build_missing_templates() {
        let (_dir, mut config) = setup();
        config.base.templates_folder = config.base.templates_folder.join("missing");
        assert!(build_site(&config, BuildMode::Site, false).is_err());
    }
}
