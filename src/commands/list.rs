//! List site content

use anyhow::{bail, Result};
use std::fmt::Write;

use crate::content::{Group, PostStore};
use crate::Site;

/// Print site content of one kind
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let store = site.load_store();
    print!("{}", render(&store, content_type)?);
    for err in store.rejected() {
        tracing::warn!("Rejected {}", err);
    }
    Ok(())
}

fn render(store: &PostStore, content_type: &str) -> Result<String> {
    let mut out = String::new();
    match content_type {
        "post" | "posts" => {
            let posts = store.all_posts();
            writeln!(out, "Posts ({}):", posts.len())?;
            for post in posts {
                writeln!(
                    out,
                    "  {} - {} [{}] {}",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.status,
                    post.source.display()
                )?;
            }
        }
        "page" | "pages" => {
            let pages = store.list_pages();
            writeln!(out, "Pages ({}):", pages.len())?;
            for page in pages {
                writeln!(out, "  {} [{}] {}", page.title, page.status, page.source.display())?;
            }
        }
        "tag" | "tags" => write_groups(&mut out, "Tags", store.tags())?,
        "category" | "categories" => write_groups(&mut out, "Categories", store.categories())?,
        "author" | "authors" => write_groups(&mut out, "Authors", store.authors())?,
        _ => bail!(
            "Unknown type: {}. Available: post, page, tag, category, author",
            content_type
        ),
    }
    Ok(out)
}

/// Groups by size, largest first
fn write_groups(out: &mut String, heading: &str, mut groups: Vec<Group<'_>>) -> Result<()> {
    groups.sort_by(|a, b| b.posts.len().cmp(&a.posts.len()));
    writeln!(out, "{} ({}):", heading, groups.len())?;
    for group in groups {
        writeln!(out, "  {} ({})", group.taxonomy.name, group.posts.len())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UrlPatterns;
    use crate::content::{Post, Taxonomy, TaxonomyKind};
    use chrono::DateTime;

    fn store() -> PostStore {
        let urls = UrlPatterns::default();
        let date = DateTime::parse_from_rfc3339("2017-09-28T00:00:00Z").unwrap();
        let mut a = Post::new("A", date, "python", &urls);
        a.tags = vec![Taxonomy::new(TaxonomyKind::Tag, "django", &urls)];
        let mut b = Post::new("B", date, "python", &urls);
        b.tags = vec![Taxonomy::new(TaxonomyKind::Tag, "django", &urls)];
        let c = Post::new("C", date, "misc", &urls);
        PostStore::new(vec![a, b, c], Vec::new())
    }

    #[test]
    fn test_list_categories_by_size() {
        let out = render(&store(), "category").unwrap();
        assert_eq!(out, "Categories (2):\n  python (2)\n  misc (1)\n");
    }

    #[test]
    fn test_list_tags() {
        let out = render(&store(), "tags").unwrap();
        assert_eq!(out, "Tags (1):\n  django (2)\n");
    }

    #[test]
    fn test_unknown_type() {
        assert!(render(&store(), "route").is_err());
    }
}
