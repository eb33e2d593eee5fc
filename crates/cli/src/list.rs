use std::path::PathBuf;

use coffer_core::Coffer;

pub async fn run(
    root: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = crate::resolve_config(root, config)?;
    let coffer = Coffer::new(config);
    coffer.init().await?;

    let store = coffer.snapshot().await;
    let mut entries: Vec<_> = store.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (name, asset) in entries {
        println!("{:>10}  {}", asset.len(), name.display());
    }
    println!("{} assets", store.len());

    Ok(())
}
