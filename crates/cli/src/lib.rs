mod list;
mod watch;

use clap::{Parser, Subcommand};
use coffer_core::CofferConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "coffer",
    version,
    about = "In-memory asset cache with filesystem-driven rebuilds",
    long_about = "Coffer loads a directory tree of binary assets into memory and keeps \
                  the cache consistent with the files on disk by rebuilding it whenever \
                  the filesystem reports a change."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cache an asset tree and rebuild it on filesystem changes
    #[command(
        long_about = "Loads the asset tree into memory, then watches every scanned \
                      directory and republishes the whole cache on each change."
    )]
    Watch {
        /// Root directory of the asset tree (overrides the config file)
        #[arg(value_name = "ASSET_ROOT")]
        root: Option<PathBuf>,
        /// Path to a JSON config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Scan an asset tree once and list what would be cached
    List {
        /// Root directory of the asset tree (overrides the config file)
        #[arg(value_name = "ASSET_ROOT")]
        root: Option<PathBuf>,
        /// Path to a JSON config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = coffer_core::logging::init_logging("cli", true);

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Watch { root, config } => rt.block_on(watch::run(root, config)),
        Commands::List { root, config } => rt.block_on(list::run(root, config)),
    }
}

fn resolve_config(
    root: Option<PathBuf>,
    config: Option<PathBuf>,
) -> coffer_core::Result<CofferConfig> {
    let mut resolved = match config {
        Some(path) => CofferConfig::from_file(path)?,
        None => CofferConfig::default(),
    };
    if let Some(root) = root {
        resolved.asset_root = root;
    }
    Ok(resolved)
}
