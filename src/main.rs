//! CLI entry point for postshelf

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "postshelf")]
#[command(version)]
#[command(about = "Read, search and serve a directory of markdown blog posts", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
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
    /// List posts, newest first
    #[command(alias = "ls")]
    List {
        /// Page number (1-based)
        #[arg(short, long)]
        page: Option<usize>,

        /// Posts per page (defaults to per_page in _config.yml)
        #[arg(short = 'n', long)]
        per_page: Option<usize>,

        /// Only list posts whose title, summary or body contains this term
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a single post
    Show {
        /// Slug of the post (file name without extension)
        slug: String,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Slug to use instead of one derived from the title
        #[arg(long)]
        slug: Option<String>,

        /// Summary to put in the front-matter
        #[arg(long)]
        summary: Option<String>,
    },

    /// Start the HTTP server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to server.port in _config.yml)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to server.host in _config.yml)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postshelf=debug,info"
    } else {
        "postshelf=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    match cli.command {
        Commands::List {
            page,
            per_page,
            search,
        } => {
            let blog = postshelf::Blog::new(&base_dir)?;
            tracing::debug!("Listing posts in {:?}", blog.posts_dir);
            postshelf::commands::list::run(&blog, page, per_page, search.as_deref()).await?;
        }

        Commands::Show { slug } => {
            let blog = postshelf::Blog::new(&base_dir)?;
            postshelf::commands::show::run(&blog, &slug).await?;
        }

        Commands::New {
            title,
            slug,
            summary,
        } => {
            let blog = postshelf::Blog::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            postshelf::commands::new::run(&blog, &title, slug.as_deref(), summary.as_deref())?;
        }

        Commands::Serve { port, ip } => {
            let blog = postshelf::Blog::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| blog.config.server.host.clone());
            let port = port.unwrap_or(blog.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            postshelf::server::start(&blog, &ip, port).await?;
        }

        Commands::Version => {
            println!("postshelf version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
