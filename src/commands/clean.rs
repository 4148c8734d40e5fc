//! Clean the output directory

use anyhow::{Context, Result};
use std::fs;

use crate::Site;

/// Remove everything a previous build wrote
pub fn run(site: &Site) -> Result<()> {
    if site.output_dir.exists() {
        fs::remove_dir_all(&site.output_dir)
            .with_context(|| format!("Failed to delete {:?}", site.output_dir))?;
        tracing::info!("Deleted: {:?}", site.output_dir);
    } else {
        tracing::debug!("Nothing to clean at {:?}", site.output_dir);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_output() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        fs::create_dir_all(site.output_dir.join("blog")).unwrap();
        fs::write(site.output_dir.join("blog/index.html"), "x").unwrap();

        run(&site).unwrap();
        assert!(!site.output_dir.exists());
        // a second clean is a no-op
        run(&site).unwrap();
    }
}
