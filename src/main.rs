use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::error;

use coubsync::catalog::{catalog_path, load_catalog};
use coubsync::config::ArchiveConfig;
use coubsync::downloader::{Planer, archive};
use coubsync::logging::init_logging;

#[derive(Parser)]
#[command(name = "coubsync")]
#[command(about = "Archive a user's coubs from a saved catalog listing")]
#[command(version = "0.1")]
struct Cli {
    #[arg(short, long, global = true, help = "debug logging")]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a directory per clip and download all of its media
    Archive {
        #[arg(short, long, help = "archive root holding <user>.json")]
        root: PathBuf,
        #[arg(short, long, help = "user whose catalog to archive")]
        user: String,
        #[arg(short, long, help = "clips downloaded at the same time")]
        concurrency: Option<usize>,
        #[arg(long, help = "TOML file with download settings")]
        config: Option<PathBuf>,
    },
    /// Print the clips that would be archived and where
    List {
        #[arg(short, long, help = "archive root holding <user>.json")]
        root: PathBuf,
        #[arg(short, long, help = "user whose catalog to list")]
        user: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Archive {
            root,
            user,
            concurrency,
            config,
        }) => {
            let mut settings = match config {
                Some(path) => ArchiveConfig::load(&path)?,
                None => ArchiveConfig::default(),
            };
            if let Some(concurrency) = concurrency {
                settings.concurrency = concurrency;
            }

            if let Err(err) = archive(&root, &user, &settings).await {
                error!(error = %err, "archive run failed");
                return Err(err.into());
            }
        }

        Some(Commands::List { root, user }) => {
            let clips = load_catalog(&catalog_path(&root, &user)).await?;
            for job in Planer::new(&root).plan(&clips) {
                println!("{}\t{}\t{}", job.id, job.title, job.dir.display());
            }
        }

        None => {
            println!("Use --help for available commands");
        }
    }

    Ok(())
}
