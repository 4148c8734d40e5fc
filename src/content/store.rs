//! Post Store - the loaded, validated collection of posts and pages

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use super::post::{Status, Taxonomy};
use super::{ContentError, Page, Post};
use crate::config::NavPage;

/// Posts grouped under one category, tag or author
#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub taxonomy: Taxonomy,
    /// Newest first
    pub posts: Vec<&'a Post>,
}

/// In-memory view of the content directory
///
/// Posts are kept newest first; pages in source order.
#[derive(Debug, Default)]
pub struct PostStore {
    posts: Vec<Post>,
    pages: Vec<Page>,
    rejected: Vec<ContentError>,
}

impl PostStore {
    /// Build a store from already valid posts and pages
    pub fn new(posts: Vec<Post>, pages: Vec<Page>) -> Self {
        Self::from_loaded(
            posts.into_iter().map(Ok).collect(),
            pages.into_iter().map(Ok).collect(),
        )
    }

    /// Build a store from load results, setting failures aside
    ///
    /// A slug that is already taken rejects the later file (in source
    /// path order), so the result does not depend on load order.
    pub fn from_loaded(
        posts: Vec<Result<Post, ContentError>>,
        pages: Vec<Result<Page, ContentError>>,
    ) -> Self {
        let mut rejected = Vec::new();

        let mut posts: Vec<Post> = posts
            .into_iter()
            .filter_map(|r| r.map_err(|e| rejected.push(e)).ok())
            .collect();
        posts.sort_by(|a, b| a.source.cmp(&b.source));
        let posts = reject_duplicates(posts, |p| (&p.slug, &p.source), &mut rejected);

        let mut pages: Vec<Page> = pages
            .into_iter()
            .filter_map(|r| r.map_err(|e| rejected.push(e)).ok())
            .collect();
        pages.sort_by(|a, b| a.source.cmp(&b.source));
        let pages = reject_duplicates(pages, |p| (&p.slug, &p.source), &mut rejected);

        let mut store = Self {
            posts,
            pages,
            rejected,
        };
        store
            .posts
            .sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
        store
    }

    /// Published posts, newest first
    pub fn list_posts(&self) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.is_listed()).collect()
    }

    /// Every loaded post regardless of status, newest first
    pub fn all_posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get_post(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Pages that get rendered (everything but drafts)
    pub fn list_pages(&self) -> Vec<&Page> {
        self.pages
            .iter()
            .filter(|p| p.status != Status::Draft)
            .collect()
    }

    pub fn get_page(&self, slug: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.slug == slug)
    }

    /// Files that failed to load
    pub fn rejected(&self) -> &[ContentError] {
        &self.rejected
    }

    /// Menu entries for published pages
    pub fn nav_pages(&self) -> Vec<NavPage> {
        self.pages
            .iter()
            .filter(|p| p.status == Status::Published)
            .map(|p| NavPage {
                slug: p.slug.clone(),
                url: p.url.clone(),
            })
            .collect()
    }

    /// Listed posts by category, sorted by category name
    pub fn categories(&self) -> Vec<Group<'_>> {
        self.group_by(|post| vec![&post.category])
    }

    /// Listed posts by tag, sorted by tag name
    pub fn tags(&self) -> Vec<Group<'_>> {
        self.group_by(|post| post.tags.iter().collect())
    }

    /// Listed posts by author, sorted by author name
    pub fn authors(&self) -> Vec<Group<'_>> {
        self.group_by(|post| post.author.iter().collect())
    }

    fn group_by<'a>(&'a self, keys: impl Fn(&'a Post) -> Vec<&'a Taxonomy>) -> Vec<Group<'a>> {
        let mut groups: BTreeMap<String, Group<'a>> = BTreeMap::new();
        for post in self.list_posts() {
            for taxonomy in keys(post) {
                match groups.entry(taxonomy.slug.clone()) {
                    Entry::Occupied(mut e) => e.get_mut().posts.push(post),
                    Entry::Vacant(e) => {
                        e.insert(Group {
                            taxonomy: taxonomy.clone(),
                            posts: vec![post],
                        });
                    }
                }
            }
        }
        let mut groups: Vec<Group<'a>> = groups.into_values().collect();
        groups.sort_by(|a, b| {
            a.taxonomy
                .name
                .to_lowercase()
                .cmp(&b.taxonomy.name.to_lowercase())
        });
        groups
    }
}

fn reject_duplicates<T>(
    items: Vec<T>,
    key: impl Fn(&T) -> (&String, &PathBuf),
    rejected: &mut Vec<ContentError>,
) -> Vec<T> {
    let mut seen: HashMap<String, PathBuf> = HashMap::new();
    let mut kept = Vec::with_capacity(items.len());
    for item in items {
        let (slug, source) = key(&item);
        if let Some(other) = seen.get(slug) {
            rejected.push(ContentError::DuplicateSlug {
                path: source.clone(),
                slug: slug.clone(),
                other: other.clone(),
            });
            continue;
        }
        seen.insert(slug.clone(), source.clone());
        kept.push(item);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UrlPatterns;
    use crate::content::TaxonomyKind;
    use chrono::DateTime;

    fn post(title: &str, date: &str, category: &str, tags: &[&str]) -> Post {
        let urls = UrlPatterns::default();
        let date = DateTime::parse_from_rfc3339(date).unwrap();
        let mut post = Post::new(title, date, category, &urls);
        post.source = PathBuf::from(format!("content/{}.md", post.slug));
        post.tags = tags
            .iter()
            .map(|t| Taxonomy::new(TaxonomyKind::Tag, t, &urls))
            .collect();
        post
    }

    fn store() -> PostStore {
        let mut draft = post("Draft", "2021-01-01T00:00:00Z", "misc", &[]);
        draft.status = Status::Draft;
        PostStore::new(
            vec![
                post("Old", "2017-01-01T00:00:00Z", "python", &["django"]),
                post("New", "2019-01-01T00:00:00Z", "javascript", &["react", "django"]),
                post("Mid", "2018-01-01T00:00:00Z", "python", &[]),
                draft,
            ],
            vec![Page::new("About", &UrlPatterns::default())],
        )
    }

    #[test]
    fn test_list_posts_newest_first() {
        let store = store();
        let titles: Vec<_> = store.list_posts().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Mid", "Old"]);
        assert_eq!(store.all_posts().len(), 4);
    }

    #[test]
    fn test_get_post_and_page() {
        let store = store();
        assert_eq!(store.get_post("mid").unwrap().title, "Mid");
        assert!(store.get_post("missing").is_none());
        assert_eq!(store.get_page("about").unwrap().title, "About");
    }

    #[test]
    fn test_groups() {
        let store = store();
        let categories = store.categories();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].taxonomy.slug, "javascript");
        assert_eq!(categories[1].posts.len(), 2);

        let tags = store.tags();
        let django = tags.iter().find(|g| g.taxonomy.slug == "django").unwrap();
        let titles: Vec<_> = django.posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Old"]);
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let mut second = post("Same", "2020-01-01T00:00:00Z", "misc", &[]);
        second.source = PathBuf::from("content/z.md");
        let first = post("Same", "2019-01-01T00:00:00Z", "misc", &[]);

        let store = PostStore::new(vec![second, first], Vec::new());
        assert_eq!(store.list_posts().len(), 1);
        assert_eq!(store.list_posts()[0].source, PathBuf::from("content/same.md"));
        assert!(matches!(
            &store.rejected()[0],
            ContentError::DuplicateSlug { path, .. } if path.ends_with("z.md")
        ));
    }

    #[test]
    fn test_nav_pages() {
        let store = store();
        assert_eq!(
            store.nav_pages(),
            vec![NavPage {
                slug: "about".to_string(),
                url: "about/".to_string()
            }]
        );
    }
}
