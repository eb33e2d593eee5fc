use std::collections::HashSet;
use std::path::{Path, PathBuf};

use notify::{
    Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode,
    Watcher as NotifyWatcher,
};
use tokio::sync::mpsc;

use super::*;
use crate::error::Result;

/// Bridges notify's callback thread into the async watch loop and owns the
/// set of subscribed directories.
struct FsWatcher {
    watcher: RecommendedWatcher,
    rx: mpsc::UnboundedReceiver<notify::Result<Event>>,
    watched: HashSet<PathBuf>,
}

impl FsWatcher {
    fn new() -> notify::Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            NotifyConfig::default(),
        )?;
        Ok(Self {
            watcher,
            rx,
            watched: HashSet::new(),
        })
    }

    /// Subscribe a directory. The watch set only grows; directories are
    /// never unsubscribed, and re-adding one is a no-op.
    fn watch_dir(&mut self, dir: &Path) -> notify::Result<()> {
        if self.watched.contains(dir) {
            return Ok(());
        }
        self.watcher.watch(dir, RecursiveMode::NonRecursive)?;
        self.watched.insert(dir.to_path_buf());
        Ok(())
    }

    async fn next_event(&mut self) -> Option<notify::Result<Event>> {
        self.rx.recv().await
    }
}

impl CofferInner {
    /// Start the background watch task over the scanned directories.
    /// Called at most once per coffer; subscription failures here surface
    /// to the first successful `init`.
    ///
    /// The task holds only a weak reference to the coffer, so dropping the
    /// last handle (or an explicit `shutdown`) ends the loop.
    pub(crate) fn spawn_watcher(self: Arc<Self>, dirs: Vec<PathBuf>) -> Result<()> {
        let mut watcher = FsWatcher::new()?;
        for dir in &dirs {
            watcher.watch_dir(dir)?;
        }

        let cancel_token = self.cancel_token.clone();
        let weak = Arc::downgrade(&self);

        tokio::spawn(async move {
            tracing::info!("watching {} asset directories", watcher.watched.len());

            loop {
                tokio::select! {
                    _ = cancel_token.cancelled() => break,
                    event = watcher.next_event() => {
                        match event {
                            Some(Ok(event)) => {
                                let Some(inner) = weak.upgrade() else { break };
                                handle_event(&inner, &mut watcher, event).await;
                            }
                            Some(Err(e)) => {
                                tracing::error!("watch error: {e}");
                            }
                            None => break,
                        }
                    }
                }
            }

            tracing::info!("asset watcher stopped");
        });

        Ok(())
    }
}

/// One event: grow the watch set on directory creation, then rebuild the
/// whole store. Every event triggers a full rebuild; failures leave the
/// previous generation in place and are logged, never propagated.
async fn handle_event(inner: &Arc<CofferInner>, watcher: &mut FsWatcher, event: Event) {
    for path in &event.paths {
        tracing::info!("file changed: {}", path.display());
    }

    if matches!(event.kind, EventKind::Create(_)) {
        for path in &event.paths {
            if path.is_dir() {
                if let Err(e) = watcher.watch_dir(path) {
                    tracing::warn!("failed to watch new directory {}: {e}", path.display());
                }
            }
        }
    }

    if let Err(e) = inner.rebuild().await {
        tracing::error!("asset rebuild failed: {e}");
    }
}
