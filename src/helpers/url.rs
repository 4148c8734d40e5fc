//! URL helper functions

use std::path::{Path, PathBuf};

use crate::config::SiteConfig;

/// Replace the `{slug}` placeholder in a URL or save-as pattern
///
/// # Examples
/// ```ignore
/// expand("blog/{slug}/", "hello-world") // -> "blog/hello-world/"
/// ```
pub fn expand(pattern: &str, slug: &str) -> String {
    pattern.replace("{slug}", slug)
}

/// Join a base URL and a relative path with exactly one slash
///
/// # Examples
/// ```ignore
/// join_url("https://x.test/", "/feed.atom") // -> "https://x.test/feed.atom"
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Absolute URL of a site-relative path
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    join_url(&config.site_url, path)
}

/// File location of a save-as pattern inside the output directory
pub fn output_path(output_dir: &Path, save_as: &str) -> PathBuf {
    save_as
        .trim_start_matches('/')
        .split('/')
        .filter(|part| !part.is_empty() && *part != "..")
        .fold(output_dir.to_path_buf(), |path, part| path.join(part))
}

/// Save-as / URL for page `n` (1-based) of a paginated listing
///
/// # Examples
/// ```ignore
/// paginated("blog/index.html", 3) // -> "blog/index3.html"
/// paginated("blog/", 2)           // -> "blog/index2.html"
/// ```
pub fn paginated(pattern: &str, n: usize) -> String {
    if n <= 1 {
        return pattern.to_string();
    }
    if pattern.is_empty() || pattern.ends_with('/') {
        return format!("{}index{}.html", pattern, n);
    }
    match pattern.rsplit_once('.') {
        Some((stem, ext)) if !ext.contains('/') => format!("{}{}.{}", stem, n, ext),
        _ => format!("{}{}", pattern, n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand() {
        assert_eq!(expand("blog/{slug}/index.html", "hi"), "blog/hi/index.html");
        assert_eq!(expand("archives.html", "hi"), "archives.html");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://x.test", "feed.atom"), "https://x.test/feed.atom");
        assert_eq!(join_url("https://x.test/", "/feed.atom"), "https://x.test/feed.atom");
        assert_eq!(join_url("", "blog/"), "/blog/");
    }

    #[test]
    fn test_full_url_for() {
        let config = SiteConfig {
            site_url: "https://example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(
            full_url_for(&config, "blog/hi/"),
            "https://example.com/blog/hi/"
        );
    }

    #[test]
    fn test_output_path() {
        let out = Path::new("/srv/out");
        assert_eq!(
            output_path(out, "blog/hi/index.html"),
            PathBuf::from("/srv/out/blog/hi/index.html")
        );
        assert_eq!(
            output_path(out, "/../etc/passwd"),
            PathBuf::from("/srv/out/etc/passwd")
        );
    }

    #[test]
    fn test_paginated() {
        assert_eq!(paginated("blog/index.html", 1), "blog/index.html");
        assert_eq!(paginated("blog/index.html", 2), "blog/index2.html");
        assert_eq!(paginated("blog/", 3), "blog/index3.html");
        assert_eq!(paginated("", 2), "index2.html");
    }
}
