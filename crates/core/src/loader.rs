use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::asset::Asset;
use crate::error::{CofferError, Result};
use crate::transform::{ContentTransformer, LabelMap};

/// Reads scanned files into memory, optionally running each through the
/// content transformer.
pub struct Loader {
    minify: bool,
    label_map: LabelMap,
    transformer: Option<Arc<dyn ContentTransformer>>,
}

impl Loader {
    pub fn new(
        minify: bool,
        label_map: LabelMap,
        transformer: Option<Arc<dyn ContentTransformer>>,
    ) -> Self {
        Self {
            minify,
            label_map,
            transformer,
        }
    }

    /// Load every path into an asset keyed by that path.
    ///
    /// All-or-nothing: the first read or transform failure aborts the whole
    /// load, so a single bad file can never blank out or partially replace
    /// a previously healthy store.
    pub fn load_all(&self, paths: &[PathBuf]) -> Result<HashMap<PathBuf, Asset>> {
        let mut assets = HashMap::with_capacity(paths.len());
        for path in paths {
            let asset = self.load_one(path)?;
            assets.insert(path.clone(), asset);
        }
        Ok(assets)
    }

    fn load_one(&self, path: &Path) -> Result<Asset> {
        let metadata = fs::metadata(path)?;
        let mod_time = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let mut content = fs::read(path)?;

        if self.minify {
            if let (Some(transformer), Some(label)) =
                (self.transformer.as_ref(), self.label_map.label_for(path))
            {
                content = transformer.transform(label, &content).map_err(|e| {
                    CofferError::Transform {
                        name: path.display().to_string(),
                        message: e.to_string(),
                    }
                })?;
            }
        }

        Ok(Asset::new(path.to_path_buf(), mod_time, content))
    }
}
