//! URL slugs and url → output path mapping.

use std::path::{Path, PathBuf};

/// Characters forbidden in file paths
const FORBIDDEN_CHARS: &[char] = &[
    '<', '>', ':', '|', '?', '*', '#', '\\', '"', '\t', '\r', '\n',
];

/// Convert a tag (or any label) to an ASCII URL segment.
///
/// Non-ASCII text is transliterated: `"Веб разработка"` → `"veb-razrabotka"`.
/// Labels that transliterate to nothing are percent-encoded instead.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode::deunicode(text.trim());

    let mut slug = String::with_capacity(ascii.len());
    let mut prev_hyphen = true;
    for ch in ascii.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        urlencoding::encode(text.trim()).into_owned()
    } else {
        slug
    }
}

/// Build a url from a path relative to the source folder.
///
/// | Source               | URL              |
/// |----------------------|------------------|
/// | `en/blog/hello.md`   | `/en/blog/hello` |
/// | `en/index.md`        | `/en`            |
/// | `index.md`           | `/`              |
pub fn url_from_source_path(relative: &Path) -> String {
    let stem = relative.with_extension("");
    let mut segments: Vec<String> = stem
        .components()
        .map(|c| sanitize_segment(&c.as_os_str().to_string_lossy()))
        .collect();

    if segments.last().is_some_and(|s| s == "index") {
        segments.pop();
    }

    format!("/{}", segments.join("/"))
}

/// Output file for a url: `/a/b` → `a/b/index.html`, `/a/feed.xml` → `a/feed.xml`.
pub fn output_path_for_url(output: &Path, url: &str) -> PathBuf {
    let relative = url.trim_matches('/');
    let last = relative.rsplit('/').next().unwrap_or_default();

    if last.contains('.') {
        output.join(relative)
    } else if relative.is_empty() {
        output.join("index.html")
    } else {
        output.join(relative).join("index.html")
    }
}

/// Remove forbidden characters and replace whitespace with hyphens
fn sanitize_segment(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}
