//! CLI entry point for sakura-ssg

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sakura_ssg::{commands, server, Site};

#[derive(Parser)]
#[command(name = "sakura")]
#[command(version)]
#[command(about = "A static blog generator with a built-in sakura theme", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new article or page
    New {
        /// Title of the new article
        title: String,

        /// Create a page instead of an article
        #[arg(long)]
        page: bool,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Keep running and regenerate on changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Generate, then serve the output directory
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Serve what is there, without watching or live reload
        #[arg(long)]
        r#static: bool,
    },

    /// Delete the output directory
    Clean,

    /// List site content
    List {
        /// Type of content to list (post, page, tag, category, author)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "sakura_ssg=debug,info"
    } else {
        "sakura_ssg=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine the current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            commands::init::init_site(&target_dir)?;
            println!("Initialized sakura site in {:?}", target_dir);
        }

        Commands::New { title, page } => {
            let site = Site::new(&base_dir)?;
            let path = site.new_post(&title, page)?;
            println!("Created: {:?}", path);
        }

        Commands::Generate { watch } => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Generating static files...");

            let result = site.generate();
            if watch {
                // a broken post should not stop the watcher from starting
                if let Err(e) = &result {
                    tracing::error!("Generation failed: {:#}", e);
                }
                tokio::task::spawn_blocking(move || commands::generate::watch(&site, |_| {}))
                    .await??;
            } else {
                let stats = result?;
                println!(
                    "Generated {} articles and {} pages.",
                    stats.articles, stats.pages
                );
            }
        }

        Commands::Server { port, ip, r#static } => {
            let site = Site::new(&base_dir)?;

            tracing::info!("Generating static files...");
            if let Err(e) = site.generate() {
                tracing::error!("Generation failed: {:#}", e);
            }

            tracing::info!("Starting server at http://{}:{}", ip, port);
            server::start(&site, &ip, port, !r#static).await?;
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = Site::new(&base_dir)?;
            commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("sakura-ssg version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
