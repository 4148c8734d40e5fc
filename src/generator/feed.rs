//! Atom and RSS feed documents

use anyhow::{anyhow, Result};
use atom_syndication::{
    CategoryBuilder as AtomCategoryBuilder, ContentBuilder, EntryBuilder, FeedBuilder,
    LinkBuilder, PersonBuilder, Text,
};
use chrono::{DateTime, FixedOffset, Utc};
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{full_url_for, join_url};
use crate::templates::FeedKind;

/// Serialize `posts` as the feed `kind` published at `path`
pub fn render_feed(
    config: &SiteConfig,
    kind: FeedKind,
    path: &str,
    title: &str,
    posts: &[&Post],
) -> Result<Vec<u8>> {
    let self_url = join_url(config.feed_domain(), path);
    if kind.is_atom() {
        atom_feed(config, &self_url, title, posts)
    } else {
        Ok(rss_channel(config, &self_url, title, posts).into_bytes())
    }
}

fn last_updated(posts: &[&Post]) -> DateTime<FixedOffset> {
    posts
        .iter()
        .map(|p| p.modified.unwrap_or(p.date))
        .max()
        .unwrap_or_else(|| Utc::now().fixed_offset())
}

fn atom_feed(config: &SiteConfig, self_url: &str, title: &str, posts: &[&Post]) -> Result<Vec<u8>> {
    let home = full_url_for(config, "");

    let entries = posts
        .iter()
        .map(|post| {
            let url = full_url_for(config, &post.url);
            let mut entry = EntryBuilder::default();
            entry
                .title(post.title.as_str())
                .id(url.clone())
                .updated(post.modified.unwrap_or(post.date))
                .published(Some(post.date))
                .links(vec![LinkBuilder::default()
                    .href(url)
                    .rel("alternate")
                    .build()])
                .summary(Some(Text::html(post.summary.clone())))
                .content(Some(
                    ContentBuilder::default()
                        .value(Some(post.content.clone()))
                        .content_type(Some("html".to_string()))
                        .build(),
                ))
                .categories(vec![AtomCategoryBuilder::default()
                    .term(post.category.name.clone())
                    .build()]);
            if let Some(author) = &post.author {
                entry.authors(vec![PersonBuilder::default()
                    .name(author.name.clone())
                    .uri(Some(full_url_for(config, &author.url)))
                    .build()]);
            }
            entry.build()
        })
        .collect::<Vec<_>>();

    let feed = FeedBuilder::default()
        .title(title)
        .id(home.clone())
        .updated(last_updated(posts))
        .links(vec![
            LinkBuilder::default().href(home).rel("alternate").build(),
            LinkBuilder::default()
                .href(self_url)
                .rel("self")
                .build(),
        ])
        .entries(entries)
        .build();

    feed.write_to(Vec::new())
        .map_err(|e| anyhow!("Failed to serialize atom feed {}: {}", self_url, e))
}

fn rss_channel(config: &SiteConfig, self_url: &str, title: &str, posts: &[&Post]) -> String {
    let items: Vec<_> = posts
        .iter()
        .map(|post| {
            let link = full_url_for(config, &post.url);
            ItemBuilder::default()
                .title(post.title.clone())
                .link(Some(link.clone()))
                .guid(Some(
                    GuidBuilder::default().permalink(true).value(link).build(),
                ))
                .description(Some(post.summary.clone()))
                .content(Some(post.content.clone()))
                .author(post.author.as_ref().map(|a| a.name.clone()))
                .pub_date(Some(post.date.to_rfc2822()))
                .categories(
                    post.tags
                        .iter()
                        .map(|t| CategoryBuilder::default().name(t.name.clone()).build())
                        .collect::<Vec<_>>(),
                )
                .build()
        })
        .collect();

    ChannelBuilder::default()
        .title(title)
        .link(full_url_for(config, ""))
        .description(format!("{} ({})", title, self_url))
        .language(Some(config.default_lang.clone()))
        .last_build_date(Some(last_updated(posts).to_rfc2822()))
        .generator(Some(format!("sakura-ssg {}", env!("CARGO_PKG_VERSION"))))
        .items(items)
        .build()
        .to_string()
}
