use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::asset::Asset;

/// One complete, atomically published generation of the asset mapping.
///
/// A store is built fully off to the side by a rebuild and then swapped in
/// as a unit; it is never mutated after publication. Readers therefore see
/// either the previous complete generation or the new one, never a mix.
#[derive(Debug, Default)]
pub struct AssetStore {
    assets: HashMap<PathBuf, Asset>,
    generation: u64,
}

impl AssetStore {
    /// The store a coffer starts with before its first successful rebuild.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(assets: HashMap<PathBuf, Asset>, generation: u64) -> Self {
        Self { assets, generation }
    }

    pub fn get(&self, name: impl AsRef<Path>) -> Option<&Asset> {
        self.assets.get(name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Which rebuild produced this store. Starts at 0 for the initial empty
    /// store and increases with every publication.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Asset)> {
        self.assets.iter().map(|(k, v)| (k.as_path(), v))
    }
}
