//! CLI entry point for junbread-blog

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use junbread_blog::{commands, server, Blog};

#[derive(Parser)]
#[command(name = "junbread-blog")]
#[command(version)]
#[command(about = "A minimal static blog generator with Markdown and Notion pages", long_about = None)]
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
    /// Create a new post or page
    New {
        /// Layout to use (post, page)
        #[arg(short, long, default_value = "post")]
        layout: String,

        /// Title of the new document
        title: String,
    },

    /// Build the static site
    #[command(alias = "g")]
    Build {
        /// Rebuild when content changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Build and serve the site locally
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Disable file watching and live reload
        #[arg(long)]
        r#static: bool,
    },

    /// Remove the generated site
    Clean,

    /// List site content
    List {
        /// Type of content to list (post, page, tag)
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
        "junbread_blog=debug,tower_http=debug,info"
    } else {
        "junbread_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };

    match cli.command {
        Commands::New { layout, title } => {
            let blog = Blog::new(&base_dir)?;
            let path = blog.new_post(&title, &layout)?;
            println!("Created: {}", path.display());
        }

        Commands::Build { watch } => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Building site...");
            blog.build()?;
            println!("Built successfully!");

            if watch {
                tokio::task::spawn_blocking(move || commands::build::watch(&blog, || {}))
                    .await??;
            }
        }

        Commands::Serve {
            port,
            ip,
            open,
            r#static,
        } => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Building site...");
            blog.build()?;
            server::start(&blog, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let blog = Blog::new(&base_dir)?;
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let blog = Blog::new(&base_dir)?;
            commands::list::run(&blog, &r#type)?;
        }

        Commands::Version => {
            println!("junbread-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
