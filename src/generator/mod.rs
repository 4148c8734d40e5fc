//! Generator module - renders the Post Store through the built-in sakura theme

mod feed;

pub use feed::render_feed;

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::content::{ContentError, Group, MarkdownRenderer, Post, PostStore, Status};
use crate::helpers::{output_path, paginated};
use crate::templates::{
    ArticleData, FeedKind, FeedScope, GroupData, Layout, PageContext, PageData, PaginationData,
    TemplateEngine, HIGHLIGHT_CSS_PATH, THEME_CSS, THEME_CSS_PATH,
};
use crate::Site;

/// Counts of what one build wrote
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    pub articles: usize,
    pub pages: usize,
    pub listings: usize,
    pub feeds: usize,
    pub static_files: usize,
}

/// Static site generator using the embedded Tera templates
pub struct Generator {
    site: Site,
    engine: TemplateEngine,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            engine: TemplateEngine::new()?,
        })
    }

    /// Generate the entire site
    ///
    /// Rejected source files are logged and skipped; once everything else has
    /// been written the build still fails so the problem is not missed.
    pub fn generate(&self, store: &PostStore, renderer: &MarkdownRenderer) -> Result<BuildStats> {
        for err in store.rejected() {
            tracing::error!("Rejected {}", err);
        }

        let output_dir = &self.site.output_dir;
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create output dir {:?}", output_dir))?;

        let config = self.render_config(store);

        let collisions = self.find_collisions(&config, store);
        for err in &collisions {
            tracing::error!("Rejected {}", err);
        }
        let skipped: HashSet<&Path> = collisions.iter().map(ContentError::path).collect();

        let mut stats = BuildStats {
            articles: self.generate_articles(&config, store, &skipped)?,
            pages: self.generate_pages(&config, store, &skipped)?,
            ..Default::default()
        };

        stats.listings += self.generate_index(&config, store)?;
        stats.listings += self.generate_taxonomies(&config, store)?;
        stats.listings += self.generate_archives(&config, store)?;

        stats.static_files = self.copy_static(&config)?;
        self.write_theme(renderer)?;
        stats.feeds = self.generate_feeds(&config, store)?;

        tracing::info!(
            "Wrote {} articles, {} pages, {} listings, {} feeds",
            stats.articles,
            stats.pages,
            stats.listings,
            stats.feeds
        );

        let rejected = store.rejected().len() + collisions.len();
        if rejected > 0 {
            bail!("{} source file(s) were rejected", rejected);
        }
        Ok(stats)
    }

    /// Site config for this build, with menu pages taken from the store
    /// unless the config lists them explicitly
    fn render_config(&self, store: &PostStore) -> SiteConfig {
        let mut config = self.site.config.clone();
        if config.nav_pages.is_empty() {
            config.nav_pages = store.nav_pages();
        }
        config
    }

    /// Every output file an article or page would overwrite
    ///
    /// Listings and theme files claim their paths first, then pages, then
    /// articles in source order; a source file whose target is already
    /// claimed is rejected.
    fn find_collisions(&self, config: &SiteConfig, store: &PostStore) -> Vec<ContentError> {
        let out = &self.site.output_dir;
        let urls = &config.urls;
        let mut claimed: HashMap<PathBuf, String> = HashMap::new();

        let mut listings = vec![(
            urls.index_save_as.clone(),
            "the index".to_string(),
            store.list_posts().len(),
        )];
        for (kind, groups) in [
            ("category", store.categories()),
            ("tag", store.tags()),
            ("author", store.authors()),
        ] {
            for group in groups {
                listings.push((
                    group.taxonomy.save_as.clone(),
                    format!("{} {:?}", kind, group.taxonomy.name),
                    group.posts.len(),
                ));
            }
        }
        for (save_as, owner, count) in listings {
            for n in 1..=page_count(config, count) {
                claimed
                    .entry(output_path(out, &paginated(&save_as, n)))
                    .or_insert_with(|| owner.clone());
            }
        }
        for (save_as, owner) in [
            (urls.categories_save_as.as_str(), "the categories list"),
            (urls.tags_save_as.as_str(), "the tags list"),
            (urls.authors_save_as.as_str(), "the authors list"),
            (urls.archives_save_as.as_str(), "the archives"),
            (THEME_CSS_PATH, "the theme stylesheet"),
            (HIGHLIGHT_CSS_PATH, "the highlight stylesheet"),
        ] {
            claimed
                .entry(output_path(out, save_as))
                .or_insert_with(|| owner.to_string());
        }

        let mut articles: Vec<&Post> = store
            .all_posts()
            .iter()
            .filter(|p| p.status != Status::Draft)
            .collect();
        articles.sort_by(|a, b| a.source.cmp(&b.source));

        let sources = store
            .list_pages()
            .into_iter()
            .map(|p| (&p.save_as, &p.source))
            .chain(articles.into_iter().map(|p| (&p.save_as, &p.source)));

        let mut rejected = Vec::new();
        for (save_as, source) in sources {
            match claimed.entry(output_path(out, save_as)) {
                Entry::Occupied(e) => rejected.push(ContentError::OutputCollision {
                    path: source.clone(),
                    save_as: save_as.clone(),
                    other: e.get().clone(),
                }),
                Entry::Vacant(e) => {
                    e.insert(source.display().to_string());
                }
            }
        }
        rejected
    }

    /// Article pages; every post is independent so they render in parallel
    fn generate_articles(
        &self,
        config: &SiteConfig,
        store: &PostStore,
        skipped: &HashSet<&Path>,
    ) -> Result<usize> {
        let posts: Vec<&Post> = store
            .all_posts()
            .iter()
            .filter(|p| {
                if p.status == Status::Draft {
                    tracing::debug!("Skipping draft {:?}", p.source);
                }
                p.status != Status::Draft && !skipped.contains(p.source.as_path())
            })
            .collect();

        posts.par_iter().try_for_each(|post| {
            let page = PageContext {
                // unlisted posts have no category feed to point at
                category: post.is_listed().then(|| post.category.clone()),
                article: Some(ArticleData::new(post, config)),
                lang: Some(post.lang.clone()),
                output_file: post.save_as.clone(),
                ..Default::default()
            };
            let html = self
                .engine
                .render_layout(Layout::Article, config, &page)
                .with_context(|| format!("Failed to render {:?}", post.source))?;
            self.write(&post.save_as, html.as_bytes())
        })?;

        tracing::info!("Generated {} article pages", posts.len());
        Ok(posts.len())
    }

    /// Generate standalone pages
    fn generate_pages(
        &self,
        config: &SiteConfig,
        store: &PostStore,
        skipped: &HashSet<&Path>,
    ) -> Result<usize> {
        let pages: Vec<_> = store
            .list_pages()
            .into_iter()
            .filter(|p| !skipped.contains(p.source.as_path()))
            .collect();
        for page in &pages {
            let context = PageContext {
                page: Some(PageData::from(*page)),
                lang: Some(page.lang.clone()),
                output_file: page.save_as.clone(),
                ..Default::default()
            };
            let html = self.engine.render_layout(Layout::Page, config, &context)?;
            self.write(&page.save_as, html.as_bytes())?;
        }
        Ok(pages.len())
    }

    fn generate_index(&self, config: &SiteConfig, store: &PostStore) -> Result<usize> {
        let urls = &config.urls;
        self.write_paginated(
            config,
            Layout::Index,
            &PageContext::default(),
            (&urls.index_url, &urls.index_save_as),
            &store.list_posts(),
        )
    }

    /// Category, tag and author pages plus their overview pages
    fn generate_taxonomies(&self, config: &SiteConfig, store: &PostStore) -> Result<usize> {
        let urls = &config.urls;
        let mut written = 0;

        let categories = store.categories();
        for group in &categories {
            let base = PageContext {
                category: Some(group.taxonomy.clone()),
                ..Default::default()
            };
            written += self.write_group(config, Layout::Category, base, group)?;
        }
        written += self.write_overview(config, Layout::Categories, &urls.categories_save_as, &categories)?;

        let tags = store.tags();
        for group in &tags {
            let base = PageContext {
                tag: Some(group.taxonomy.clone()),
                ..Default::default()
            };
            written += self.write_group(config, Layout::Tag, base, group)?;
        }
        written += self.write_overview(config, Layout::Tags, &urls.tags_save_as, &tags)?;

        let authors = store.authors();
        for group in &authors {
            let base = PageContext {
                author: Some(group.taxonomy.clone()),
                ..Default::default()
            };
            written += self.write_group(config, Layout::Author, base, group)?;
        }
        written += self.write_overview(config, Layout::Authors, &urls.authors_save_as, &authors)?;

        tracing::info!(
            "Generated {} category, {} tag and {} author pages",
            categories.len(),
            tags.len(),
            authors.len()
        );
        Ok(written)
    }

    fn write_group(
        &self,
        config: &SiteConfig,
        layout: Layout,
        base: PageContext,
        group: &Group<'_>,
    ) -> Result<usize> {
        self.write_paginated(
            config,
            layout,
            &base,
            (&group.taxonomy.url, &group.taxonomy.save_as),
            &group.posts,
        )
    }

    fn write_overview(
        &self,
        config: &SiteConfig,
        layout: Layout,
        save_as: &str,
        groups: &[Group<'_>],
    ) -> Result<usize> {
        let context = PageContext {
            groups: groups.iter().map(GroupData::from).collect(),
            output_file: save_as.to_string(),
            ..Default::default()
        };
        let html = self.engine.render_layout(layout, config, &context)?;
        self.write(save_as, html.as_bytes())?;
        Ok(1)
    }

    /// Generate archive page
    fn generate_archives(&self, config: &SiteConfig, store: &PostStore) -> Result<usize> {
        let save_as = &config.urls.archives_save_as;
        let context = PageContext {
            articles: store
                .list_posts()
                .into_iter()
                .map(|p| ArticleData::new(p, config))
                .collect(),
            output_file: save_as.clone(),
            ..Default::default()
        };
        let html = self.engine.render_layout(Layout::Archives, config, &context)?;
        self.write(save_as, html.as_bytes())?;
        Ok(1)
    }

    /// Render a post listing, split into pages when pagination is configured
    ///
    /// Page `n > 1` lands next to the first one: `index.html`, `index2.html`, ...
    fn write_paginated(
        &self,
        config: &SiteConfig,
        layout: Layout,
        base: &PageContext,
        (url, save_as): (&str, &str),
        posts: &[&Post],
    ) -> Result<usize> {
        let per_page = config.default_pagination.unwrap_or(posts.len()).max(1);
        // an empty listing still gets its page
        let chunks: Vec<&[&Post]> = if posts.is_empty() {
            vec![posts]
        } else {
            posts.chunks(per_page).collect()
        };
        let num_pages = chunks.len();

        for (i, chunk) in chunks.iter().enumerate() {
            let number = i + 1;
            let target = paginated(save_as, number);
            let context = PageContext {
                articles: chunk.iter().map(|p| ArticleData::new(p, config)).collect(),
                pagination: config.default_pagination.map(|_| PaginationData {
                    number,
                    num_pages,
                    prev_url: (number > 1).then(|| paginated(url, number - 1)),
                    next_url: (number < num_pages).then(|| paginated(url, number + 1)),
                }),
                output_file: target.clone(),
                ..base.clone()
            };
            let html = self.engine.render_layout(layout, config, &context)?;
            self.write(&target, html.as_bytes())?;
        }

        Ok(num_pages)
    }

    /// Copy `static_paths` from the content directory
    fn copy_static(&self, config: &SiteConfig) -> Result<usize> {
        let content_dir = &self.site.content_dir;
        let mut copied = 0;

        for static_path in &config.static_paths {
            let source = content_dir.join(static_path);
            if !source.exists() {
                tracing::debug!("Static path {:?} does not exist, skipping", source);
                continue;
            }

            for entry in WalkDir::new(&source)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                let relative = entry.path().strip_prefix(content_dir)?;
                let dest = self.site.output_dir.join(relative);
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(entry.path(), &dest)
                    .with_context(|| format!("Failed to copy {:?}", entry.path()))?;
                copied += 1;
            }
        }

        tracing::debug!("Copied {} static files", copied);
        Ok(copied)
    }

    /// Write the two stylesheets the skeleton links to
    fn write_theme(&self, renderer: &MarkdownRenderer) -> Result<()> {
        self.write(THEME_CSS_PATH, THEME_CSS.as_bytes())?;
        self.write(HIGHLIGHT_CSS_PATH, renderer.highlight_css().as_bytes())
    }

    /// Write every configured feed
    fn generate_feeds(&self, config: &SiteConfig, store: &PostStore) -> Result<usize> {
        if config.feeds.is_empty() {
            return Ok(0);
        }

        let posts = store.list_posts();
        let categories = store.categories();
        let tags = store.tags();
        let mut written = 0;

        for kind in FeedKind::ALL {
            match kind.scope() {
                FeedScope::Site => {
                    let Some(path) = kind.path(&config.feeds, "") else {
                        continue;
                    };
                    let selected: Vec<&Post> = match kind {
                        FeedKind::Atom | FeedKind::Rss => posts
                            .iter()
                            .copied()
                            .filter(|p| p.lang == config.default_lang)
                            .collect(),
                        _ => posts.clone(),
                    };
                    self.write_feed(config, kind, &path, &config.site_name, &selected)?;
                    written += 1;
                }
                FeedScope::Category | FeedScope::Tag => {
                    let groups = if kind.scope() == FeedScope::Category {
                        &categories
                    } else {
                        &tags
                    };
                    for group in groups {
                        let Some(path) = kind.path(&config.feeds, &group.taxonomy.slug) else {
                            break;
                        };
                        let title = format!("{} - {}", config.site_name, group.taxonomy.name);
                        self.write_feed(config, kind, &path, &title, &group.posts)?;
                        written += 1;
                    }
                }
            }
        }

        tracing::info!("Generated {} feeds", written);
        Ok(written)
    }

    fn write_feed(
        &self,
        config: &SiteConfig,
        kind: FeedKind,
        path: &str,
        title: &str,
        posts: &[&Post],
    ) -> Result<()> {
        let xml = render_feed(config, kind, path, title, posts)?;
        self.write(path, &xml)
    }

    /// Write a file below the output directory
    fn write(&self, save_as: &str, contents: &[u8]) -> Result<()> {
        let path = output_path(&self.site.output_dir, save_as);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&path, contents).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::debug!("Generated: {:?}", path);
        Ok(())
    }
}

/// Number of pages a listing of `posts` posts is split into
fn page_count(config: &SiteConfig, posts: usize) -> usize {
    match config.default_pagination {
        Some(per_page) if per_page > 0 => posts.div_ceil(per_page).max(1),
        _ => 1,
    }
}
