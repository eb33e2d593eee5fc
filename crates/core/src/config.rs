use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

fn default_enabled() -> bool {
    true
}

fn default_asset_root() -> PathBuf {
    PathBuf::from("assets")
}

fn default_asset_extensions() -> Vec<String> {
    [".html", ".css", ".js", ".json", ".xml", ".svg"]
        .iter()
        .map(|e| e.to_string())
        .collect()
}

/// Configuration recognized by the coffer.
///
/// Loaded from a JSON config file or built in code; every field has a
/// default so partial files work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CofferConfig {
    /// If false, `init` is a silent no-op and the store stays empty.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Root directory of the asset tree. A missing root is not an error:
    /// the cache degrades to an empty store.
    #[serde(default = "default_asset_root")]
    pub asset_root: PathBuf,

    /// File extensions to load (leading dot optional).
    #[serde(default = "default_asset_extensions")]
    pub asset_extensions: Vec<String>,

    /// Gates content transformation. Has no effect unless a transformer is
    /// installed on the coffer.
    #[serde(default)]
    pub minify: bool,
}

impl Default for CofferConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            asset_root: default_asset_root(),
            asset_extensions: default_asset_extensions(),
            minify: false,
        }
    }
}

impl CofferConfig {
    /// Read configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
