//! Generate static files

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEvent};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::content::ContentLoader;
use crate::generator::{BuildStats, Generator};
use crate::{Site, CONFIG_FILE};

/// Load the content and render the whole site
pub fn run(site: &Site) -> Result<BuildStats> {
    let start = Instant::now();

    let loader = ContentLoader::new(&site.config, &site.content_dir);
    let store = loader.load_store();
    tracing::info!(
        "Loaded {} posts and {} pages from {:?}",
        store.all_posts().len(),
        store.list_pages().len(),
        site.content_dir
    );

    let stats = Generator::new(site)?.generate(&store, loader.renderer())?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    Ok(stats)
}

/// Block watching the content directory and `sakura.yml`, regenerating
/// after each burst of changes
///
/// The site is reopened on every rebuild so config edits take effect.
/// `on_rebuild` sees the result of every regeneration.
pub fn watch<F>(site: &Site, mut on_rebuild: F) -> Result<()>
where
    F: FnMut(&Result<BuildStats>),
{
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if site.content_dir.exists() {
        debouncer
            .watcher()
            .watch(&site.content_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", site.content_dir);
    }

    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        match result {
            Ok(events) => {
                let changed: Vec<&DebouncedEvent> = events
                    .iter()
                    .filter(|e| is_relevant(&e.path, &site.output_dir))
                    .collect();
                if changed.is_empty() {
                    continue;
                }
                for event in &changed {
                    tracing::info!("File changed: {}", event.path.display());
                }

                let result = Site::new(&site.base_dir).and_then(|site| run(&site));
                if let Err(e) = &result {
                    tracing::error!("Generation failed: {:#}", e);
                }
                on_rebuild(&result);
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}

/// Editor droppings and our own output never trigger a rebuild
fn is_relevant(path: &Path, output_dir: &Path) -> bool {
    if path.starts_with(output_dir) {
        return false;
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    !(name.starts_with('.') || name.ends_with('~') || name.ends_with(".swp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_reports_rejected_files() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        fs::create_dir_all(&site.content_dir).unwrap();
        fs::write(
            site.content_dir.join("good.md"),
            "Title: Good\nDate: 2017-09-28\n\nFine.\n",
        )
        .unwrap();
        fs::write(site.content_dir.join("bad.md"), "Date: 2017-09-28\n\nNo title.\n").unwrap();

        let err = run(&site).unwrap_err();
        assert!(err.to_string().contains("1 source file(s) were rejected"));
        // the good post is still written
        assert!(site.output_dir.join("blog/good/index.html").is_file());
    }

    #[test]
    fn test_is_relevant() {
        let out = Path::new("/site/output");
        assert!(is_relevant(Path::new("/site/content/post.md"), out));
        assert!(!is_relevant(Path::new("/site/content/.post.md.swx"), out));
        assert!(!is_relevant(Path::new("/site/content/post.md~"), out));
        assert!(!is_relevant(Path::new("/site/output/blog/index.html"), out));
    }
}
