//! sakura-ssg: a static blog generator with a built-in sakura theme
//!
//! Markdown articles with a `Key: Value` header are rendered through Tera
//! templates embedded in the binary into a directory of static HTML, with
//! optional Atom and RSS feeds.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the site configuration file in the site root
pub const CONFIG_FILE: &str = "sakura.yml";

/// A site on disk: its configuration and resolved directories
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown sources
    pub content_dir: PathBuf,
    /// Generated output
    pub output_dir: PathBuf,
}

impl Site {
    /// Open the site rooted at `base_dir`; a missing `sakura.yml` means defaults
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::from_config(base_dir, config))
    }

    pub fn from_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let output_dir = base_dir.join(&config.output_dir);

        Self {
            config,
            base_dir,
            content_dir,
            output_dir,
        }
    }

    /// Load every post and page
    pub fn load_store(&self) -> content::PostStore {
        content::ContentLoader::new(&self.config, &self.content_dir).load_store()
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<generator::BuildStats> {
        commands::generate::run(self)
    }

    /// Clean the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new article, or a page with `page` set
    pub fn new_post(&self, title: &str, page: bool) -> Result<PathBuf> {
        commands::new::create_post(self, title, page)
    }
}
