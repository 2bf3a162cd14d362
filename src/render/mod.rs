//! Body and page rendering: Markdown to HTML, pages through templates.

pub mod markdown;
pub mod template;

pub use template::TemplateRenderer;
