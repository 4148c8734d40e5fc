//! Post and Page models

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::UrlPatterns;
use crate::helpers::expand;

/// Publication status from the `Status:` header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Published,
    Draft,
    /// Rendered but left out of listings, menus and feeds
    Hidden,
}

impl FromStr for Status {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "published" => Ok(Status::Published),
            "draft" => Ok(Status::Draft),
            "hidden" => Ok(Status::Hidden),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Published => "published",
            Status::Draft => "draft",
            Status::Hidden => "hidden",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonomyKind {
    Category,
    Tag,
    Author,
}

/// A category, tag or author as seen by templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    pub name: String,
    pub slug: String,
    pub url: String,
    pub save_as: String,
}

impl Taxonomy {
    pub fn new(kind: TaxonomyKind, name: &str, urls: &UrlPatterns) -> Self {
        let slug = slug::slugify(name);
        let (url, save_as) = match kind {
            TaxonomyKind::Category => (&urls.category_url, &urls.category_save_as),
            TaxonomyKind::Tag => (&urls.tag_url, &urls.tag_save_as),
            TaxonomyKind::Author => (&urls.author_url, &urls.author_save_as),
        };
        Self {
            name: name.to_string(),
            url: expand(url, &slug),
            save_as: expand(save_as, &slug),
            slug,
        }
    }
}

/// A blog post
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub title: String,

    /// URL-friendly name, from `Slug:` or derived from the title
    pub slug: String,

    pub date: DateTime<FixedOffset>,
    pub modified: Option<DateTime<FixedOffset>>,

    pub category: Taxonomy,
    pub tags: Vec<Taxonomy>,
    pub author: Option<Taxonomy>,

    pub lang: String,
    pub status: Status,

    /// HTML summary, explicit or the first paragraph
    pub summary: String,

    /// Raw markdown body
    pub body: String,

    /// Rendered HTML content
    pub content: String,

    /// Source file path
    pub source: PathBuf,

    /// URL path relative to the site root
    pub url: String,
    pub save_as: String,

    /// Header keys with no dedicated field
    pub extra: IndexMap<String, String>,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(
        title: &str,
        date: DateTime<FixedOffset>,
        category: &str,
        urls: &UrlPatterns,
    ) -> Self {
        let slug = slug::slugify(title);
        Self {
            title: title.to_string(),
            url: expand(&urls.article_url, &slug),
            save_as: expand(&urls.article_save_as, &slug),
            slug,
            date,
            modified: None,
            category: Taxonomy::new(TaxonomyKind::Category, category, urls),
            tags: Vec::new(),
            author: None,
            lang: String::new(),
            status: Status::Published,
            summary: String::new(),
            body: String::new(),
            content: String::new(),
            source: PathBuf::new(),
            extra: IndexMap::new(),
        }
    }

    /// Replace the slug and the URLs derived from it
    pub fn set_slug(&mut self, slug: &str, urls: &UrlPatterns) {
        self.slug = slug.to_string();
        self.url = expand(&urls.article_url, slug);
        self.save_as = expand(&urls.article_save_as, slug);
    }

    /// Whether the post is listed in indexes and feeds
    pub fn is_listed(&self) -> bool {
        self.status == Status::Published
    }
}

/// A standalone page
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub title: String,
    pub slug: String,
    pub date: Option<DateTime<FixedOffset>>,
    pub modified: Option<DateTime<FixedOffset>>,
    pub lang: String,
    pub status: Status,
    pub body: String,
    pub content: String,
    pub source: PathBuf,
    pub url: String,
    pub save_as: String,
    pub extra: IndexMap<String, String>,
}

impl Page {
    pub fn new(title: &str, urls: &UrlPatterns) -> Self {
        let slug = slug::slugify(title);
        Self {
            title: title.to_string(),
            url: expand(&urls.page_url, &slug),
            save_as: expand(&urls.page_save_as, &slug),
            slug,
            date: None,
            modified: None,
            lang: String::new(),
            status: Status::Published,
            body: String::new(),
            content: String::new(),
            source: PathBuf::new(),
            extra: IndexMap::new(),
        }
    }

    pub fn set_slug(&mut self, slug: &str, urls: &UrlPatterns) {
        self.slug = slug.to_string();
        self.url = expand(&urls.page_url, slug);
        self.save_as = expand(&urls.page_save_as, slug);
    }
}
