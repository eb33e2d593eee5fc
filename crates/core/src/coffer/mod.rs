//! Coffer orchestration: one asset store, one watcher, per instance.
//!
//! The coffer manages the current generation of the asset store using the
//! single-writer/many-reader discipline:
//! - Readers get cheap snapshots (Arc clone) and never block on a rebuild
//! - Rebuilds construct a new store off to the side and atomically swap it
//! - The background watcher is the only writer after the initial `init`

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::asset::Asset;
use crate::config::CofferConfig;
use crate::store::AssetStore;
use crate::transform::{ContentTransformer, LabelMap};

mod lifecycle;
mod watch;

/// Handle to an asset cache. Cheap to clone; all clones share one store
/// and one watcher.
#[derive(Clone)]
pub struct Coffer {
    inner: Arc<CofferInner>,
}

pub(crate) struct CofferInner {
    config: CofferConfig,
    label_map: LabelMap,
    transformer: Option<Arc<dyn ContentTransformer>>,

    /// Current generation of the store (double Arc for snapshot reads).
    current: RwLock<Arc<AssetStore>>,

    /// Generations already handed out to publications.
    generations: AtomicU64,

    /// Guards one-time watcher startup across repeated `init` calls.
    watch_started: tokio::sync::OnceCell<()>,

    /// Cancellation for the background watch task.
    cancel_token: CancellationToken,
}

impl Drop for CofferInner {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

pub struct CofferBuilder {
    config: CofferConfig,
    label_map: LabelMap,
    transformer: Option<Arc<dyn ContentTransformer>>,
}

impl CofferBuilder {
    pub fn new(config: CofferConfig) -> Self {
        Self {
            config,
            label_map: LabelMap::default(),
            transformer: None,
        }
    }

    /// Install the transformer consulted when `minify` is enabled.
    pub fn with_transformer(mut self, transformer: Arc<dyn ContentTransformer>) -> Self {
        self.transformer = Some(transformer);
        self
    }

    /// Replace the extension-to-label mapping used for dispatch.
    pub fn with_label_map(mut self, label_map: LabelMap) -> Self {
        self.label_map = label_map;
        self
    }

    pub fn build(self) -> Coffer {
        Coffer {
            inner: Arc::new(CofferInner {
                config: self.config,
                label_map: self.label_map,
                transformer: self.transformer,
                current: RwLock::new(Arc::new(AssetStore::empty())),
                generations: AtomicU64::new(0),
                watch_started: tokio::sync::OnceCell::new(),
                cancel_token: CancellationToken::new(),
            }),
        }
    }
}

impl Coffer {
    /// Create a builder for a coffer.
    pub fn builder(config: CofferConfig) -> CofferBuilder {
        CofferBuilder::new(config)
    }

    /// Build a coffer with the default label map and no transformer.
    pub fn new(config: CofferConfig) -> Self {
        CofferBuilder::new(config).build()
    }

    /// Look up an asset in the live store. Non-blocking with respect to
    /// rebuilds and never triggers one.
    pub async fn asset(&self, name: impl AsRef<Path>) -> Option<Asset> {
        self.snapshot().await.get(name).cloned()
    }

    /// The whole current generation (cheap Arc clone). Use this when
    /// several lookups must be answered from one self-consistent store.
    pub async fn snapshot(&self) -> Arc<AssetStore> {
        self.inner.current.read().await.clone()
    }

    pub fn config(&self) -> &CofferConfig {
        &self.inner.config
    }

    pub fn root_path(&self) -> &Path {
        &self.inner.config.asset_root
    }

    /// Stop the background watcher deterministically. Dropping the last
    /// handle has the same effect.
    pub fn shutdown(&self) {
        self.inner.cancel_token.cancel();
    }
}

impl CofferInner {
    /// Swap in a fully built mapping as the next generation. The
    /// generation number is assigned under the write lock, so generations
    /// are totally ordered by publication.
    pub(crate) async fn publish(&self, assets: HashMap<PathBuf, Asset>) -> u64 {
        let mut lock = self.current.write().await;
        let generation = self.generations.fetch_add(1, Ordering::SeqCst) + 1;
        *lock = Arc::new(AssetStore::new(assets, generation));
        generation
    }
}
