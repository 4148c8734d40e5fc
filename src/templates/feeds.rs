//! `<link rel="alternate">` computation for the page head

use serde::Serialize;

use super::PageContext;
use crate::config::{FeedUrls, SiteConfig};
use crate::helpers::{expand, join_url};

/// The eight configurable feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    AllAtom,
    AllRss,
    Atom,
    Rss,
    CategoryAtom,
    CategoryRss,
    TagAtom,
    TagRss,
}

/// What a feed's `{slug}` placeholder is filled from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedScope {
    Site,
    Category,
    Tag,
}

impl FeedKind {
    /// Emission order in the page head
    pub const ALL: [FeedKind; 8] = [
        FeedKind::AllAtom,
        FeedKind::AllRss,
        FeedKind::Atom,
        FeedKind::Rss,
        FeedKind::CategoryAtom,
        FeedKind::CategoryRss,
        FeedKind::TagAtom,
        FeedKind::TagRss,
    ];

    /// The configured path pattern, if set and non-empty
    pub fn pattern(self, feeds: &FeedUrls) -> Option<&str> {
        let value = match self {
            FeedKind::AllAtom => &feeds.all_atom,
            FeedKind::AllRss => &feeds.all_rss,
            FeedKind::Atom => &feeds.atom,
            FeedKind::Rss => &feeds.rss,
            FeedKind::CategoryAtom => &feeds.category_atom,
            FeedKind::CategoryRss => &feeds.category_rss,
            FeedKind::TagAtom => &feeds.tag_atom,
            FeedKind::TagRss => &feeds.tag_rss,
        };
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn scope(self) -> FeedScope {
        match self {
            FeedKind::CategoryAtom | FeedKind::CategoryRss => FeedScope::Category,
            FeedKind::TagAtom | FeedKind::TagRss => FeedScope::Tag,
            _ => FeedScope::Site,
        }
    }

    pub fn is_atom(self) -> bool {
        matches!(
            self,
            FeedKind::AllAtom | FeedKind::Atom | FeedKind::CategoryAtom | FeedKind::TagAtom
        )
    }

    pub fn mime(self) -> &'static str {
        if self.is_atom() {
            "application/atom+xml"
        } else {
            "application/rss+xml"
        }
    }

    fn label(self) -> &'static str {
        match self {
            FeedKind::AllAtom => "Full Atom Feed",
            FeedKind::AllRss => "Full RSS Feed",
            FeedKind::Atom => "Atom Feed",
            FeedKind::Rss => "RSS Feed",
            FeedKind::CategoryAtom => "Categories Atom Feed",
            FeedKind::CategoryRss => "Categories RSS Feed",
            FeedKind::TagAtom => "Tags Atom Feed",
            FeedKind::TagRss => "Tags RSS Feed",
        }
    }

    /// Site-relative path of this feed for `slug`, if configured
    pub fn path(self, feeds: &FeedUrls, slug: &str) -> Option<String> {
        self.pattern(feeds).map(|p| expand(p, slug))
    }
}

/// One alternate link as the base skeleton renders it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedLink {
    pub href: String,
    pub mime: &'static str,
    pub title: String,
}

/// Alternate links for a page
///
/// A scoped feed is skipped when the page has no matching category or tag.
pub fn feed_links(site: &SiteConfig, page: &PageContext) -> Vec<FeedLink> {
    FeedKind::ALL
        .iter()
        .filter_map(|&kind| {
            let slug = match kind.scope() {
                FeedScope::Site => "",
                FeedScope::Category => page.category.as_ref()?.slug.as_str(),
                FeedScope::Tag => page.tag.as_ref()?.slug.as_str(),
            };
            let path = kind.path(&site.feeds, slug)?;
            Some(FeedLink {
                href: join_url(site.feed_domain(), &path),
                mime: kind.mime(),
                title: format!("{} {}", site.site_name, kind.label()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UrlPatterns;
    use crate::content::{Taxonomy, TaxonomyKind};

    fn site(feeds: FeedUrls) -> SiteConfig {
        SiteConfig {
            site_name: "v1k45".to_string(),
            feed_domain: Some("https://x.test".to_string()),
            feeds,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_feeds_no_links() {
        let page = PageContext::default();
        assert!(feed_links(&site(FeedUrls::default()), &page).is_empty());
    }

    #[test]
    fn test_blank_value_counts_as_unset() {
        let feeds = FeedUrls {
            rss: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(feed_links(&site(feeds), &PageContext::default()).is_empty());
    }

    #[test]
    fn test_all_atom_href() {
        let feeds = FeedUrls {
            all_atom: Some("feed.atom".to_string()),
            ..Default::default()
        };
        let links = feed_links(&site(feeds), &PageContext::default());
        assert_eq!(
            links,
            vec![FeedLink {
                href: "https://x.test/feed.atom".to_string(),
                mime: "application/atom+xml",
                title: "v1k45 Full Atom Feed".to_string(),
            }]
        );
    }

    #[test]
    fn test_scoped_feeds_need_context() {
        let feeds = FeedUrls {
            category_atom: Some("feeds/{slug}.atom.xml".to_string()),
            tag_rss: Some("feeds/tag/{slug}.rss.xml".to_string()),
            ..Default::default()
        };
        let site = site(feeds);
        assert!(feed_links(&site, &PageContext::default()).is_empty());

        let page = PageContext {
            category: Some(Taxonomy::new(
                TaxonomyKind::Category,
                "misc",
                &UrlPatterns::default(),
            )),
            ..Default::default()
        };
        let links = feed_links(&site, &page);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, "https://x.test/feeds/misc.atom.xml");
        assert_eq!(links[0].title, "v1k45 Categories Atom Feed");
    }

    #[test]
    fn test_order_and_mime() {
        let all = |v: &str| Some(v.to_string());
        let feeds = FeedUrls {
            all_atom: all("a"),
            all_rss: all("b"),
            atom: all("c"),
            rss: all("d"),
            category_atom: all("e/{slug}"),
            category_rss: all("f/{slug}"),
            tag_atom: all("g/{slug}"),
            tag_rss: all("h/{slug}"),
        };
        let urls = UrlPatterns::default();
        let page = PageContext {
            category: Some(Taxonomy::new(TaxonomyKind::Category, "c", &urls)),
            tag: Some(Taxonomy::new(TaxonomyKind::Tag, "t", &urls)),
            ..Default::default()
        };
        let links = feed_links(&site(feeds), &page);
        let hrefs: Vec<_> = links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(
            hrefs,
            vec![
                "https://x.test/a",
                "https://x.test/b",
                "https://x.test/c",
                "https://x.test/d",
                "https://x.test/e/c",
                "https://x.test/f/c",
                "https://x.test/g/t",
                "https://x.test/h/t",
            ]
        );
        assert_eq!(links[7].mime, "application/rss+xml");
    }
}
