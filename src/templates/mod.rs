//! Built-in sakura theme rendered with the Tera template engine
//!
//! The theme is one base skeleton with four named regions. A layout is a
//! mapping from region to template source; it is compiled into a child
//! template that extends the skeleton, so any region it leaves out keeps the
//! skeleton's content.

mod context;
mod feeds;
mod layouts;

pub use context::{ArticleData, GroupData, PageContext, PageData, PaginationData};
pub use feeds::{feed_links, FeedKind, FeedLink, FeedScope};
pub use layouts::Layout;

use anyhow::{Context as _, Result};
use std::collections::BTreeMap;
use tera::{Context, Tera};

use crate::config::{NavPage, SiteConfig};

pub const BASE_TEMPLATE: &str = "base.html";

/// Rendered between navigation entries
pub const NAV_SEPARATOR: &str = r#"<span class="nav-sep">/</span>"#;

const ADHOC_TEMPLATE: &str = "__overrides__.html";

/// Output locations of the two stylesheets the skeleton links to
pub const THEME_CSS_PATH: &str = "theme/css/sakura-dark.css";
pub const HIGHLIGHT_CSS_PATH: &str = "theme/css/pygment.css";

pub const THEME_CSS: &str = include_str!("sakura/sakura-dark.css");

/// A named region of the base skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Block {
    Head,
    Title,
    Content,
    Scripts,
}

impl Block {
    pub const ALL: [Block; 4] = [Block::Head, Block::Title, Block::Content, Block::Scripts];

    pub fn name(self) -> &'static str {
        match self {
            Block::Head => "head",
            Block::Title => "title",
            Block::Content => "content",
            Block::Scripts => "scripts",
        }
    }
}

/// Region overrides for one render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockOverrides(BTreeMap<Block, String>);

impl BlockOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of `insert`
    pub fn with(mut self, block: Block, source: impl Into<String>) -> Self {
        self.insert(block, source);
        self
    }

    pub fn insert(&mut self, block: Block, source: impl Into<String>) {
        self.0.insert(block, source.into());
    }

    pub fn get(&self, block: Block) -> Option<&str> {
        self.0.get(&block).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tera source of a child template that extends the skeleton
    pub fn to_template(&self) -> String {
        let mut source = format!("{{% extends \"{}\" %}}\n", BASE_TEMPLATE);
        for (block, body) in &self.0 {
            let name = block.name();
            source.push_str(&format!(
                "{{% block {name} %}}{body}{{% endblock {name} %}}\n"
            ));
        }
        source
    }
}

/// Template renderer with the embedded sakura theme
#[derive(Clone)]
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Create a new renderer with the skeleton and every built-in layout loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Generating HTML on purpose; content is already rendered markup
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            (BASE_TEMPLATE, include_str!("sakura/base.html")),
            ("article_list.html", include_str!("sakura/article_list.html")),
        ])?;

        let layouts: Vec<(&str, String)> = Layout::ALL
            .iter()
            .map(|layout| (layout.template_name(), layout.overrides().to_template()))
            .collect();
        tera.add_raw_templates(layouts)?;

        Ok(Self { tera })
    }

    /// Render the skeleton with `overrides` applied
    pub fn render(
        &self,
        site: &SiteConfig,
        page: &PageContext,
        overrides: &BlockOverrides,
    ) -> Result<String> {
        let context = build_context(site, page)?;
        if overrides.is_empty() {
            return Ok(self.tera.render(BASE_TEMPLATE, &context)?);
        }
        let mut tera = self.tera.clone();
        tera.add_raw_template(ADHOC_TEMPLATE, &overrides.to_template())
            .context("Invalid block override")?;
        Ok(tera.render(ADHOC_TEMPLATE, &context)?)
    }

    /// Render one of the precompiled layouts
    pub fn render_layout(
        &self,
        layout: Layout,
        site: &SiteConfig,
        page: &PageContext,
    ) -> Result<String> {
        let context = build_context(site, page)?;
        self.tera
            .render(layout.template_name(), &context)
            .with_context(|| format!("Failed to render {}", layout.template_name()))
    }
}

fn build_context(site: &SiteConfig, page: &PageContext) -> Result<Context> {
    let mut context = Context::from_serialize(page)?;

    context.insert("SITENAME", &site.site_name);
    context.insert("SITEURL", site.site_url.trim_end_matches('/'));
    context.insert("AUTHOR", &site.author);
    context.insert("DEFAULT_LANG", &site.default_lang);
    context.insert(
        "lang",
        page.lang.as_deref().unwrap_or(&site.default_lang),
    );
    context.insert("GOOGLE_ANALYTICS", &site.google_analytics);

    context.insert("FEED_DOMAIN", site.feed_domain());
    let feeds = &site.feeds;
    context.insert("FEED_ALL_ATOM", &feeds.all_atom);
    context.insert("FEED_ALL_RSS", &feeds.all_rss);
    context.insert("FEED_ATOM", &feeds.atom);
    context.insert("FEED_RSS", &feeds.rss);
    context.insert("CATEGORY_FEED_ATOM", &feeds.category_atom);
    context.insert("CATEGORY_FEED_RSS", &feeds.category_rss);
    context.insert("TAG_FEED_ATOM", &feeds.tag_atom);
    context.insert("TAG_FEED_RSS", &feeds.tag_rss);
    context.insert("feed_links", &feed_links(site, page));

    let pages: &[NavPage] = if site.display_pages_on_menu {
        site.nav_pages.as_slice()
    } else {
        &[]
    };
    context.insert("pages", pages);
    context.insert("LINKS", &site.nav_links);
    context.insert("NAV_SEPARATOR", NAV_SEPARATOR);

    Ok(context)
}
