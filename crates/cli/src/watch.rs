use std::path::PathBuf;

use coffer_core::Coffer;
use tracing::info;

pub async fn run(
    root: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = crate::resolve_config(root, config)?;
    let coffer = Coffer::new(config);

    info!("Loading assets under {}...", coffer.root_path().display());
    coffer.init().await?;

    let store = coffer.snapshot().await;
    info!(
        "Cached {} assets (generation {}).",
        store.len(),
        store.generation()
    );
    info!("Watching for changes. Press Ctrl+C to stop.");

    tokio::signal::ctrl_c().await?;
    coffer.shutdown();
    info!("Watcher stopped.");

    Ok(())
}
