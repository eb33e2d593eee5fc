use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// A binary asset file held resident in memory.
///
/// Assets are immutable once constructed: a changed file on disk produces a
/// new `Asset` in the next published store generation, never an in-place
/// mutation. The content is Arc-shared, so cloning an `Asset` (or an entire
/// store snapshot) is cheap.
#[derive(Debug, Clone)]
pub struct Asset {
    name: PathBuf,
    mod_time: SystemTime,
    content: Arc<[u8]>,
}

/// Independent random-access view over an asset's bytes.
///
/// Every call to [`Asset::reader`] yields a fresh reader positioned at the
/// start, so callers may seek and re-read concurrently without affecting
/// each other or the asset itself.
pub type AssetReader = Cursor<Arc<[u8]>>;

impl Asset {
    pub fn new(name: PathBuf, mod_time: SystemTime, content: Vec<u8>) -> Self {
        Self {
            name,
            mod_time,
            content: content.into(),
        }
    }

    /// The canonical lookup key: the path this asset was scanned under.
    pub fn name(&self) -> &Path {
        &self.name
    }

    /// Modification time of the source file as observed at load.
    pub fn mod_time(&self) -> SystemTime {
        self.mod_time
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// A fresh `Read + Seek` view positioned at offset 0.
    pub fn reader(&self) -> AssetReader {
        Cursor::new(self.content.clone())
    }
}
