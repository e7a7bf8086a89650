//! CLI entry point for notion-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "notion-blog")]
#[command(version)]
#[command(about = "Fetch and normalize a Notion-backed blog", long_about = None)]
struct Cli {
    /// Directory containing notion.yml (defaults to current directory)
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
    /// List published posts
    #[command(alias = "ls")]
    Posts {
        /// Only show posts carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Print normalized posts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one post by slug
    Post {
        /// Slug of the post
        slug: String,

        /// Also fetch and print the post's content
        #[arg(long)]
        content: bool,

        /// Print the post as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the content tree of a page
    Page {
        /// Notion page id (with or without hyphens)
        page_id: String,

        /// Print the blocks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "notion_blog=debug,info"
    } else {
        "notion_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Posts { tag, json } => {
            let blog = notion_blog::NotionBlog::new(&base_dir)?;
            notion_blog::commands::posts::run(&blog, tag.as_deref(), json).await?;
        }

        Commands::Post {
            slug,
            content,
            json,
        } => {
            let blog = notion_blog::NotionBlog::new(&base_dir)?;
            notion_blog::commands::post::run(&blog, &slug, content, json).await?;
        }

        Commands::Page { page_id, json } => {
            let blog = notion_blog::NotionBlog::new(&base_dir)?;
            notion_blog::commands::page::run(&blog, &page_id, json).await?;
        }

        Commands::Config => {
            let blog = notion_blog::NotionBlog::new(&base_dir)?;
            notion_blog::commands::config::run(&blog)?;
        }

        Commands::Version => {
            println!("notion-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
