//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn source_folder() -> PathBuf {
        "source".into()
    }

    pub fn templates_folder() -> PathBuf {
        "templates".into()
    }

    pub fn public_folder() -> PathBuf {
        "public".into()
    }

    pub fn source_types() -> Vec<String> {
        vec!["md".into(), "html".into()]
    }

    pub fn posts_per_page() -> usize {
        10
    }

    pub fn posts_in_feed() -> usize {
        20
    }

    pub fn cut_tag() -> String {
        "<!-- cut -->".into()
    }

    pub fn url() -> Option<String> {
        None
    }

    pub fn lang() -> String {
        "en".into()
    }

    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }
}
