//! Data structures for template context

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{Group, Page, Post, Taxonomy};
use crate::helpers::{date_xml, format_date};

/// Per-page variables; everything site-wide comes from `SiteConfig`
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageContext {
    /// Drives the category-scoped feed links
    pub category: Option<Taxonomy>,
    /// Drives the tag-scoped feed links
    pub tag: Option<Taxonomy>,
    pub author: Option<Taxonomy>,
    pub article: Option<ArticleData>,
    pub page: Option<PageData>,
    pub articles: Vec<ArticleData>,
    pub groups: Vec<GroupData>,
    pub pagination: Option<PaginationData>,
    pub lang: Option<String>,
    pub output_file: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleData {
    pub title: String,
    pub slug: String,
    pub url: String,
    pub locale_date: String,
    pub date_iso: String,
    pub locale_modified: Option<String>,
    pub modified_iso: Option<String>,
    pub category: Taxonomy,
    pub tags: Vec<Taxonomy>,
    pub author: Option<Taxonomy>,
    pub summary: String,
    pub content: String,
    pub lang: String,
}

impl ArticleData {
    pub fn new(post: &Post, config: &SiteConfig) -> Self {
        let fmt = &config.default_date_format;
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            url: post.url.clone(),
            locale_date: format_date(&post.date, fmt),
            date_iso: date_xml(&post.date),
            locale_modified: post.modified.as_ref().map(|d| format_date(d, fmt)),
            modified_iso: post.modified.as_ref().map(date_xml),
            category: post.category.clone(),
            tags: post.tags.clone(),
            author: post.author.clone(),
            summary: post.summary.clone(),
            content: post.content.clone(),
            lang: post.lang.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    pub title: String,
    pub slug: String,
    pub url: String,
    pub content: String,
    pub lang: String,
}

impl From<&Page> for PageData {
    fn from(page: &Page) -> Self {
        Self {
            title: page.title.clone(),
            slug: page.slug.clone(),
            url: page.url.clone(),
            content: page.content.clone(),
            lang: page.lang.clone(),
        }
    }
}

/// One row of the categories / tags / authors list pages
#[derive(Debug, Clone, Serialize)]
pub struct GroupData {
    pub name: String,
    pub slug: String,
    pub url: String,
    pub count: usize,
}

impl From<&Group<'_>> for GroupData {
    fn from(group: &Group<'_>) -> Self {
        Self {
            name: group.taxonomy.name.clone(),
            slug: group.taxonomy.slug.clone(),
            url: group.taxonomy.url.clone(),
            count: group.posts.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationData {
    /// 1-based
    pub number: usize,
    pub num_pages: usize,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
}
