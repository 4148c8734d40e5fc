//! Initialize a new site

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = r#"# sakura-ssg configuration

site_name: My Blog
author: Anonymous
site_url: ''
default_lang: en
timezone: UTC
default_category: misc
default_date_format: '%a %d %B %Y'
# default_pagination: 10
display_pages_on_menu: true
# google_analytics: UA-XXXXXXXX-X

content_dir: content
pages_dir: pages
output_dir: output
static_paths:
  - pdfs
  - images

# feed_domain: https://example.com
feeds:
  all_atom: feeds/all.atom.xml
  category_atom: feeds/{slug}.atom.xml

nav_links: []
#  - name: GitHub
#    href: https://github.com/
"#;

const HELLO_WORLD: &str = r#"Title: Hello, world!
Date: {date}
Category: misc
Tags: welcome
Summary: The first post on this blog.

Welcome! This post was created by `sakura init`. Edit or delete it, then run
`sakura generate` to rebuild the site.

## Writing

Each article starts with a header of `Key: Value` lines, ends it with a blank
line and continues in Markdown:

```rust
fn main() {
    println!("Hello, world!");
}
```

Create the next one with `sakura new "My New Post"`.
"#;

const ABOUT_PAGE: &str = r#"Title: About

This blog is built with sakura-ssg.
"#;

/// Create `sakura.yml` and a starter content tree in `target_dir`
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        bail!("{:?} already contains a {}", target_dir, CONFIG_FILE);
    }

    let config: SiteConfig = serde_yaml::from_str(CONFIG_TEMPLATE)?;
    let content_dir = target_dir.join(&config.content_dir);
    let pages_dir = content_dir.join(&config.pages_dir);
    for dir in [&pages_dir, &content_dir.join("images")] {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }

    fs::write(&config_path, CONFIG_TEMPLATE)?;

    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let post_path = content_dir.join("hello-world.md");
    if !post_path.exists() {
        fs::write(&post_path, HELLO_WORLD.replace("{date}", &today))?;
    }
    let about_path = pages_dir.join("about.md");
    if !about_path.exists() {
        fs::write(&about_path, ABOUT_PAGE)?;
    }

    tracing::info!("Initialized site in {:?}", target_dir);
    Ok(())
}
