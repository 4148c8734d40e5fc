//! Content module - handles posts, pages, and content processing

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod store;

pub use error::ContentError;
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use loader::ContentLoader;
pub use markdown::{markdown_to_html, MarkdownRenderer, HIGHLIGHT_THEME};
pub use post::{Page, Post, Status, Taxonomy, TaxonomyKind};
pub use store::{Group, PostStore};
