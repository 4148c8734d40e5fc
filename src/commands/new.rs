//! Create a new article or page

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Write a source file skeleton for `title` and return its path
///
/// Articles go straight into the content directory, pages into its
/// pages directory. Existing files are never overwritten.
pub fn create_post(site: &Site, title: &str, page: bool) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        bail!("Cannot derive a file name from title {:?}", title);
    }

    let target_dir = if page {
        site.content_dir.join(&site.config.pages_dir)
    } else {
        site.content_dir.clone()
    };
    fs::create_dir_all(&target_dir)
        .with_context(|| format!("Failed to create {:?}", target_dir))?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Utc::now().with_timezone(&site.config.tz());
    let date = now.format("%Y-%m-%d %H:%M").to_string();
    let header = if page {
        format!("Title: {}\nDate: {}\n", title, date)
    } else {
        format!(
            "Title: {}\nDate: {}\nCategory: {}\nTags:\nStatus: draft\n",
            title, date, site.config.default_category
        )
    };

    fs::write(&file_path, format!("{}\n", header))
        .with_context(|| format!("Failed to write {:?}", file_path))?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
