//! Site configuration (sakura.yml)

use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
///
/// Loaded once per build and passed by reference into every render call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub site_name: String,
    pub author: String,
    pub site_url: String,
    pub default_lang: String,
    pub timezone: String,
    pub default_category: String,
    pub default_date_format: String,
    pub default_pagination: Option<usize>,
    pub display_pages_on_menu: bool,
    pub google_analytics: Option<String>,

    // Directory
    pub content_dir: String,
    pub pages_dir: String,
    pub output_dir: String,
    pub static_paths: Vec<String>,

    // Feeds
    pub feed_domain: Option<String>,
    pub feeds: FeedUrls,

    // Navigation
    pub nav_pages: Vec<NavPage>,
    pub nav_links: Vec<NavLink>,

    // URL / output layout
    pub urls: UrlPatterns,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "My Blog".to_string(),
            author: "Anonymous".to_string(),
            site_url: String::new(),
            default_lang: "en".to_string(),
            timezone: "UTC".to_string(),
            default_category: "misc".to_string(),
            default_date_format: "%a %d %B %Y".to_string(),
            default_pagination: None,
            display_pages_on_menu: true,
            google_analytics: None,

            content_dir: "content".to_string(),
            pages_dir: "pages".to_string(),
            output_dir: "output".to_string(),
            static_paths: vec!["pdfs".to_string(), "images".to_string()],

            feed_domain: None,
            feeds: FeedUrls::default(),

            nav_pages: Vec::new(),
            nav_links: Vec::new(),

            urls: UrlPatterns::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.validate()?;
        tracing::debug!("Loaded site config from {:?}", path);
        Ok(config)
    }

    /// Reject settings that would only fail later, mid-build
    pub fn validate(&self) -> Result<()> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("Unknown timezone {:?}: {}", self.timezone, e))?;
        if self.default_pagination == Some(0) {
            return Err(anyhow!("default_pagination must be greater than zero"));
        }
        Ok(())
    }

    /// The configured timezone, UTC if it does not parse
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or(chrono_tz::UTC)
    }

    /// Domain prepended to feed paths; falls back to the site URL
    pub fn feed_domain(&self) -> &str {
        self.feed_domain
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(&self.site_url)
    }
}

/// Feed output paths, all optional
///
/// The category and tag variants carry a `{slug}` placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedUrls {
    pub all_atom: Option<String>,
    pub all_rss: Option<String>,
    pub atom: Option<String>,
    pub rss: Option<String>,
    pub category_atom: Option<String>,
    pub category_rss: Option<String>,
    pub tag_atom: Option<String>,
    pub tag_rss: Option<String>,
}

impl FeedUrls {
    /// True if no feed of any kind is configured
    pub fn is_empty(&self) -> bool {
        self == &FeedUrls::default()
    }
}

/// A page listed in the navigation bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavPage {
    pub slug: String,
    pub url: String,
}

/// An external or internal link listed after the pages in the navigation bar
///
/// Accepts either `{name, href}` or a `[name, href]` pair in YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "NavLinkRepr")]
pub struct NavLink {
    pub name: String,
    pub href: String,
}

impl NavLink {
    pub fn new(name: &str, href: &str) -> Self {
        Self {
            name: name.to_string(),
            href: href.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NavLinkRepr {
    Pair(String, String),
    Map { name: String, href: String },
}

impl From<NavLinkRepr> for NavLink {
    fn from(repr: NavLinkRepr) -> Self {
        match repr {
            NavLinkRepr::Pair(name, href) | NavLinkRepr::Map { name, href } => {
                NavLink { name, href }
            }
        }
    }
}

/// URL and output path patterns; `{slug}` is replaced per item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlPatterns {
    pub article_url: String,
    pub article_save_as: String,
    pub page_url: String,
    pub page_save_as: String,
    pub category_url: String,
    pub category_save_as: String,
    pub categories_url: String,
    pub categories_save_as: String,
    pub tag_url: String,
    pub tag_save_as: String,
    pub tags_url: String,
    pub tags_save_as: String,
    pub author_url: String,
    pub author_save_as: String,
    pub authors_url: String,
    pub authors_save_as: String,
    pub index_url: String,
    pub index_save_as: String,
    pub archives_url: String,
    pub archives_save_as: String,
}

impl Default for UrlPatterns {
    fn default() -> Self {
        Self {
            article_url: "blog/{slug}/".to_string(),
            article_save_as: "blog/{slug}/index.html".to_string(),
            page_url: "{slug}/".to_string(),
            page_save_as: "{slug}/index.html".to_string(),
            category_url: "blog/categories/{slug}/".to_string(),
            category_save_as: "blog/categories/{slug}/index.html".to_string(),
            categories_url: "blog/categories/".to_string(),
            categories_save_as: "blog/categories/index.html".to_string(),
            tag_url: "blog/tags/{slug}/".to_string(),
            tag_save_as: "blog/tags/{slug}/index.html".to_string(),
            tags_url: "blog/tags/".to_string(),
            tags_save_as: "blog/tags/index.html".to_string(),
            author_url: "blog/authors/{slug}/".to_string(),
            author_save_as: "blog/authors/{slug}/index.html".to_string(),
            authors_url: "blog/authors/".to_string(),
            authors_save_as: "blog/authors/index.html".to_string(),
            index_url: "blog/".to_string(),
            index_save_as: "blog/index.html".to_string(),
            archives_url: "archives.html".to_string(),
            archives_save_as: "archives.html".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.default_lang, "en");
        assert_eq!(config.default_category, "misc");
        assert!(config.feeds.is_empty());
        assert!(config.nav_links.is_empty());
        assert_eq!(config.urls.article_save_as, "blog/{slug}/index.html");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
site_name: v1k45
author: Vikas Yadav
timezone: Asia/Kolkata
feed_domain: https://v1k45.com
feeds:
  all_atom: feeds/all.atom.xml
  category_atom: feeds/{slug}.atom.xml
nav_links:
  - [blog, /blog/]
  - name: github
    href: https://github.com/v1k45
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        config.validate().unwrap();
        assert_eq!(config.site_name, "v1k45");
        assert_eq!(config.tz(), chrono_tz::Asia::Kolkata);
        assert_eq!(config.feeds.all_atom.as_deref(), Some("feeds/all.atom.xml"));
        assert_eq!(config.feeds.rss, None);
        assert_eq!(
            config.nav_links,
            vec![
                NavLink::new("blog", "/blog/"),
                NavLink::new("github", "https://github.com/v1k45"),
            ]
        );
        assert_eq!(config.feed_domain(), "https://v1k45.com");
    }

    #[test]
    fn test_missing_keys_keep_site_defaults() {
        let config: SiteConfig = serde_yaml::from_str("site_name: x\n").unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.site_name, "x");
        assert_eq!(config.static_paths, vec!["pdfs", "images"]);
        assert_eq!(config.static_paths, defaults.static_paths);
        assert_eq!(config.feeds, defaults.feeds);
        assert_eq!(config.nav_pages, defaults.nav_pages);
        assert_eq!(config.nav_links, defaults.nav_links);
        assert_eq!(config.urls.article_save_as, defaults.urls.article_save_as);
        assert_eq!(config.urls.index_save_as, defaults.urls.index_save_as);
    }

    #[test]
    fn test_feed_domain_falls_back_to_site_url() {
        let config = SiteConfig {
            site_url: "https://example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(config.feed_domain(), "https://example.com");
    }

    #[test]
    fn test_rejects_unknown_timezone() {
        let config = SiteConfig {
            timezone: "Mars/Olympus".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
