//! Build error types.
//!
//! Every variant carries the path that failed; all of them abort the build.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to load source `{path}`")]
    SourceLoad {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("invalid front matter in `{path}`")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to render `{path}`")]
    Render {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to write `{path}`")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{}` and `{}` both render to `{url}`", first.display(), second.display())]
    DuplicateUrl {
        url: String,
        first: PathBuf,
        second: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_build_error_display_has_path() {
        let err = BuildError::Render {
            path: PathBuf::from("en/blog/hello.md"),
            source: anyhow!("template `post.html` not found"),
        };
        assert_eq!(err.to_string(), "failed to render `en/blog/hello.md`");

        let chain = format!("{:#}", anyhow::Error::from(err));
        assert!(chain.contains("post.html"));
    }

    #[test]
    fn test_duplicate_url_names_both_sources() {
        let err = BuildError::DuplicateUrl {
            url: "/en".into(),
            first: PathBuf::from("en/index.md"),
            second: PathBuf::from("en"),
        };
        assert_eq!(err.to_string(), "`en/index.md` and `en` both render to `/en`");
    }
}
