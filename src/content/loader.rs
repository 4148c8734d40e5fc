//! Content loader - loads posts and pages from the content directory

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::markdown::first_paragraph;
use super::post::{Status, Taxonomy, TaxonomyKind};
use super::{ContentError, FrontMatter, MarkdownRenderer, Page, Post, PostStore};
use crate::config::SiteConfig;
use crate::helpers::parse_datetime;

/// Loads content from the content directory
pub struct ContentLoader<'a> {
    config: &'a SiteConfig,
    content_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(config: &'a SiteConfig, content_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            content_dir: content_dir.into(),
            renderer: MarkdownRenderer::new(),
        }
    }

    pub fn renderer(&self) -> &MarkdownRenderer {
        &self.renderer
    }

    fn pages_dir(&self) -> PathBuf {
        self.content_dir.join(&self.config.pages_dir)
    }

    /// Load everything into a store; bad files end up in `PostStore::rejected`
    pub fn load_store(&self) -> PostStore {
        let posts = self.load_posts();
        let pages = self.load_pages();
        PostStore::from_loaded(posts, pages)
    }

    /// Load every article outside the pages and static directories
    pub fn load_posts(&self) -> Vec<Result<Post, ContentError>> {
        let pages_dir = self.pages_dir();
        let static_dirs: Vec<PathBuf> = self
            .config
            .static_paths
            .iter()
            .map(|p| self.content_dir.join(p))
            .collect();

        let files = markdown_files(&self.content_dir, |path| {
            path != pages_dir.as_path() && !static_dirs.iter().any(|s| s.as_path() == path)
        });
        tracing::debug!("Found {} article sources", files.len());

        files.par_iter().map(|path| self.load_post(path)).collect()
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<Post, ContentError> {
        let text = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (fm, body) = FrontMatter::parse(&text).map_err(|source| ContentError::FrontMatter {
            path: path.to_path_buf(),
            source,
        })?;

        let title = require(path, "Title", fm.title.as_deref())?;
        let date_value = require(path, "Date", fm.date.as_deref())?;
        let date = self.parse_date(path, "Date", date_value)?;
        let modified = fm
            .modified
            .as_deref()
            .map(|v| self.parse_date(path, "Modified", v))
            .transpose()?;
        let status = parse_status(path, fm.status.as_deref())?;

        let urls = &self.config.urls;
        let category = fm
            .category
            .as_deref()
            .unwrap_or(&self.config.default_category);

        let mut post = Post::new(title, date, category, urls);
        if let Some(slug) = &fm.slug {
            post.set_slug(slug, urls);
        }
        require_slug(path, title, &post.slug)?;
        post.modified = modified;
        post.status = status;
        post.lang = fm.lang.unwrap_or_else(|| self.config.default_lang.clone());

        for name in &fm.tags {
            let tag = Taxonomy::new(TaxonomyKind::Tag, name, urls);
            if !post.tags.iter().any(|t| t.slug == tag.slug) {
                post.tags.push(tag);
            }
        }

        let author = fm.author.as_deref().unwrap_or(&self.config.author);
        if !author.is_empty() {
            post.author = Some(Taxonomy::new(TaxonomyKind::Author, author, urls));
        }

        post.content = self.renderer.render(body);
        post.summary = match &fm.summary {
            Some(summary) => self.renderer.render(summary),
            None => first_paragraph(&post.content),
        };
        post.body = body.to_string();
        post.source = path.to_path_buf();
        post.extra = fm.extra;

        tracing::debug!("Loaded post {:?} from {:?}", post.slug, path);
        Ok(post)
    }

    /// Load all pages from the pages directory
    pub fn load_pages(&self) -> Vec<Result<Page, ContentError>> {
        let pages_dir = self.pages_dir();
        if !pages_dir.is_dir() {
            return Vec::new();
        }
        markdown_files(&pages_dir, |_| true)
            .iter()
            .map(|path| self.load_page(path))
            .collect()
    }

    /// Load a single page from a file
    pub fn load_page(&self, path: &Path) -> Result<Page, ContentError> {
        let text = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (fm, body) = FrontMatter::parse(&text).map_err(|source| ContentError::FrontMatter {
            path: path.to_path_buf(),
            source,
        })?;

        let title = require(path, "Title", fm.title.as_deref())?;
        let urls = &self.config.urls;

        let mut page = Page::new(title, urls);
        if let Some(slug) = &fm.slug {
            page.set_slug(slug, urls);
        }
        require_slug(path, title, &page.slug)?;
        page.date = fm
            .date
            .as_deref()
            .map(|v| self.parse_date(path, "Date", v))
            .transpose()?;
        page.modified = fm
            .modified
            .as_deref()
            .map(|v| self.parse_date(path, "Modified", v))
            .transpose()?;
        page.status = parse_status(path, fm.status.as_deref())?;
        page.lang = fm.lang.unwrap_or_else(|| self.config.default_lang.clone());
        page.content = self.renderer.render(body);
        page.body = body.to_string();
        page.source = path.to_path_buf();
        page.extra = fm.extra;

        Ok(page)
    }

    fn parse_date(
        &self,
        path: &Path,
        field: &'static str,
        value: &str,
    ) -> Result<chrono::DateTime<chrono::FixedOffset>, ContentError> {
        parse_datetime(value, self.config.tz()).ok_or_else(|| ContentError::InvalidDate {
            path: path.to_path_buf(),
            field,
            value: value.to_string(),
        })
    }
}

fn require<'v>(
    path: &Path,
    field: &'static str,
    value: Option<&'v str>,
) -> Result<&'v str, ContentError> {
    value.ok_or_else(|| ContentError::MissingField {
        path: path.to_path_buf(),
        field,
    })
}

fn parse_status(path: &Path, value: Option<&str>) -> Result<Status, ContentError> {
    match value {
        None => Ok(Status::Published),
        Some(v) => v.parse().map_err(|_| ContentError::InvalidStatus {
            path: path.to_path_buf(),
            value: v.to_string(),
        }),
    }
}

/// Markdown files under `dir` in name order, skipping dot files and any
/// directory for which `descend` returns false
fn markdown_files(dir: &Path, descend: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }
    WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let hidden = e.depth() > 0 && e.file_name().to_string_lossy().starts_with('.');
            !hidden && (!e.file_type().is_dir() || descend(e.path()))
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_markdown_file(e.path()))
        .map(|e| e.into_path())
        .collect()
}

/// Check if a file is a markdown file
/// An empty slug would put the file at its listing's own output path
fn require_slug(path: &Path, title: &str, slug: &str) -> Result<(), ContentError> {
    if slug.trim().is_empty() {
        return Err(ContentError::EmptySlug {
            path: path.to_path_buf(),
            title: title.to_string(),
        });
    }
    Ok(())
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, text: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_load_post() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            tmp.path(),
            "hello.md",
            "Title: Hello, world!\nDate: 2017-09-28\nTags: intro, Intro, meta\nSeries: one\n\nFirst *post*.\n\nSecond paragraph.\n",
        );
        let config = SiteConfig::default();
        let loader = ContentLoader::new(&config, tmp.path());

        let post = loader.load_post(&path).unwrap();
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.category.name, "misc");
        assert_eq!(post.tags.len(), 2);
        assert_eq!(post.author.as_ref().unwrap().name, "Anonymous");
        assert_eq!(post.lang, "en");
        assert_eq!(post.summary, "<p>First <em>post</em>.</p>");
        assert!(post.content.contains("<p>Second paragraph.</p>"));
        assert_eq!(post.extra["series"], "one");
    }

    #[test]
    fn test_explicit_slug_and_summary() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            tmp.path(),
            "a.md",
            "Title: A long title\nSlug: short\nDate: 2020-01-01\nSummary: Just *this*\n\nBody\n",
        );
        let config = SiteConfig::default();
        let post = ContentLoader::new(&config, tmp.path()).load_post(&path).unwrap();
        assert_eq!(post.url, "blog/short/");
        assert!(post.summary.contains("<em>this</em>"));
    }

    #[test]
    fn test_errors_name_the_file() {
        let tmp = TempDir::new().unwrap();
        let config = SiteConfig::default();
        let loader = ContentLoader::new(&config, tmp.path());

        let no_date = write(tmp.path(), "no-date.md", "Title: A\n\nbody");
        let err = loader.load_post(&no_date).unwrap_err();
        assert!(matches!(err, ContentError::MissingField { field: "Date", .. }));
        assert!(err.to_string().contains("no-date.md"));

        let bad_date = write(tmp.path(), "bad-date.md", "Title: A\nDate: someday\n\nbody");
        let err = loader.load_post(&bad_date).unwrap_err();
        assert!(matches!(err, ContentError::InvalidDate { .. }));
        assert_eq!(err.path(), bad_date.as_path());

        let bad_status = write(tmp.path(), "bad-status.md", "Title: A\nDate: 2020-01-01\nStatus: gone\n\n");
        assert!(matches!(
            loader.load_post(&bad_status).unwrap_err(),
            ContentError::InvalidStatus { .. }
        ));

        let no_header = write(tmp.path(), "plain.md", "# Heading\n\ntext");
        let err = loader.load_post(&no_header).unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }));
        assert!(err.to_string().contains("plain.md"));
    }

    #[test]
    fn test_rejects_empty_slug() {
        let tmp = TempDir::new().unwrap();
        let config = SiteConfig::default();
        let loader = ContentLoader::new(&config, tmp.path());

        let post = write(tmp.path(), "marks.md", "Title: ???\nDate: 2020-01-01\n\nbody");
        let err = loader.load_post(&post).unwrap_err();
        assert!(matches!(err, ContentError::EmptySlug { .. }));
        assert!(err.to_string().contains("marks.md"));

        let fixed = write(tmp.path(), "fixed.md", "Title: ???\nSlug: marks\nDate: 2020-01-01\n\nbody");
        assert_eq!(loader.load_post(&fixed).unwrap().save_as, "blog/marks/index.html");

        let page = write(tmp.path(), "pages/blank.md", "Title: !!!\n\nbody");
        assert!(matches!(
            loader.load_page(&page).unwrap_err(),
            ContentError::EmptySlug { .. }
        ));
    }

    #[test]
    fn test_page_date_is_optional() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "pages/about.md", "Title: About\n\nMe.\n");
        let config = SiteConfig::default();
        let page = ContentLoader::new(&config, tmp.path()).load_page(&path).unwrap();
        assert_eq!(page.url, "about/");
        assert!(page.date.is_none());
    }

    #[test]
    fn test_load_store_skips_pages_and_static_dirs() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "one.md", "Title: One\nDate: 2020-01-01\n\n1");
        write(tmp.path(), "2020/two.md", "Title: Two\nDate: 2020-02-01\n\n2");
        write(tmp.path(), "pages/about.md", "Title: About\n\nMe");
        write(tmp.path(), "images/notes.md", "not a post");
        write(tmp.path(), ".drafts/x.md", "not a post either");
        write(tmp.path(), "broken.md", "Title: Broken\n\nno date");

        let config = SiteConfig::default();
        let store = ContentLoader::new(&config, tmp.path()).load_store();

        let titles: Vec<_> = store.list_posts().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Two", "One"]);
        assert_eq!(store.list_pages().len(), 1);
        assert_eq!(store.rejected().len(), 1);
        assert!(store.rejected()[0].path().ends_with("broken.md"));
    }
}
