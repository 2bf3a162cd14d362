//! Writing rendered pages under the public folder.

use crate::{
    error::BuildError,
    generator::RenderedPage,
    log,
    logger::ProgressBars,
    utils::{
        minify::{MinifyType, minify},
        slug::output_path_for_url,
    },
};
use rayon::prelude::*;
use std::{fs, path::Path};

/// Write every page to the file its url maps to.
///
/// `/a/b` becomes `a/b/index.html`, `/a/feed.xml` stays `a/feed.xml`.
pub fn save_pages(pages: &[RenderedPage], output: &Path, minify_output: bool) -> Result<(), BuildError> {
    let progress = ProgressBars::new(&[("write", pages.len())]);

    pages.par_iter().try_for_each(|page| {
        save_page(page, output, minify_output)?;
        progress.inc("write");
        Ok::<_, BuildError>(())
    })?;

    let written = progress.count("write");
    progress.finish();
    log!("write"; "{written} files to {}", output.display());
    Ok(())
}

fn save_page(page: &RenderedPage, output: &Path, minify_output: bool) -> Result<(), BuildError> {
    let path = output_path_for_url(output, &page.url);
    let write_error = |source: std::io::Error| BuildError::Write {
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    let content = minify(
        MinifyType::for_path(&path, page.content.as_bytes()),
        minify_output,
    );
    fs::write(&path, &*content).map_err(write_error)
}
