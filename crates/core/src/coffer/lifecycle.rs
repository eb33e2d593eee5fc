use std::path::PathBuf;

use super::*;
use crate::error::{CofferError, Result};
use crate::loader::Loader;
use crate::scanner::PathScanner;

impl Coffer {
    /// Scan, load and publish the asset tree, then start the watcher.
    ///
    /// Safe to call repeatedly. Caching disabled or a missing root is a
    /// silent no-op, not an error. On any scan/load/transform failure the
    /// previous store stays untouched and the error is returned. The
    /// watcher starts once, the first time `init` succeeds; subsequent
    /// rebuilds (including watcher-triggered ones) reuse it.
    pub async fn init(&self) -> Result<()> {
        let inner = &self.inner;

        if !inner.config.enabled {
            return Ok(());
        }
        if !inner.config.asset_root.exists() {
            return Ok(());
        }

        let dirs = inner.rebuild().await?;

        inner
            .watch_started
            .get_or_try_init(|| async { inner.clone().spawn_watcher(dirs) })
            .await?;

        Ok(())
    }
}

impl CofferInner {
    /// One full rebuild: scan, load, publish. Returns the directories the
    /// scan visited so the caller can seed the watch set.
    ///
    /// The new store is built entirely off to the side; on failure nothing
    /// is published and the live generation is untouched.
    pub(crate) async fn rebuild(&self) -> Result<Vec<PathBuf>> {
        let scanner = PathScanner::new(&self.config.asset_extensions);
        let root = self.config.asset_root.clone();
        let outcome = tokio::task::spawn_blocking(move || scanner.scan(&root))
            .await
            .map_err(|e| CofferError::Internal(e.to_string()))??;

        let loader = Loader::new(
            self.config.minify,
            self.label_map.clone(),
            self.transformer.clone(),
        );
        let files = outcome.files;
        let assets = tokio::task::spawn_blocking(move || loader.load_all(&files))
            .await
            .map_err(|e| CofferError::Internal(e.to_string()))??;

        let count = assets.len();
        let generation = self.publish(assets).await;
        tracing::info!("published asset store generation {generation} ({count} assets)");

        Ok(outcome.dirs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CofferConfig;
    use crate::transform::{ContentTransformer, LabelMap, TransformError};
    use std::fs;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct UppercaseTransformer;

    impl ContentTransformer for UppercaseTransformer {
        fn transform(&self, _label: &str, input: &[u8]) -> std::result::Result<Vec<u8>, TransformError> {
            Ok(input.to_ascii_uppercase())
        }
    }

    /// Succeeds until armed, then fails every call.
    struct ArmableTransformer {
        armed: AtomicBool,
    }

    impl ContentTransformer for ArmableTransformer {
        fn transform(&self, _label: &str, input: &[u8]) -> std::result::Result<Vec<u8>, TransformError> {
            if self.armed.load(Ordering::SeqCst) {
                Err("armed failure".into())
            } else {
                Ok(input.to_vec())
            }
        }
    }

    fn config_for(root: &std::path::Path) -> CofferConfig {
        CofferConfig {
            asset_root: root.to_path_buf(),
            ..CofferConfig::default()
        }
    }

    #[tokio::test]
    async fn test_init_loads_files_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let css = dir.path().join("site.css");
        fs::write(&css, b"a{color:red}").unwrap();

        let coffer = Coffer::new(config_for(dir.path()));
        coffer.init().await.unwrap();

        let asset = coffer.asset(&css).await.unwrap();
        assert_eq!(asset.content(), b"a{color:red}");
    }

    #[tokio::test]
    async fn test_minify_applies_transformer_to_mapped_extensions_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("site.css"), b"a{}").unwrap();
        fs::write(dir.path().join("font.woff2"), b"raw").unwrap();

        let mut config = config_for(dir.path());
        config.minify = true;
        config.asset_extensions = vec!["css".into(), "woff2".into()];

        let coffer = Coffer::builder(config)
            .with_transformer(Arc::new(UppercaseTransformer))
            .build();
        coffer.init().await.unwrap();

        let css = coffer.asset(dir.path().join("site.css")).await.unwrap();
        assert_eq!(css.content(), b"A{}");
        let woff = coffer.asset(dir.path().join("font.woff2")).await.unwrap();
        assert_eq!(woff.content(), b"raw");
    }

    #[tokio::test]
    async fn test_init_twice_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.css"), b"a{}").unwrap();

        let coffer = Coffer::new(config_for(dir.path()));
        coffer.init().await.unwrap();
        let first = coffer.snapshot().await;
        coffer.init().await.unwrap();
        let second = coffer.snapshot().await;

        assert_eq!(first.len(), second.len());
        assert!(second.generation() > first.generation());
        let key = dir.path().join("a.css");
        assert_eq!(
            first.get(&key).unwrap().content(),
            second.get(&key).unwrap().content()
        );
    }

    #[tokio::test]
    async fn test_failed_rebuild_keeps_previous_store() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.css"), b"a{}").unwrap();

        let mut config = config_for(dir.path());
        config.minify = true;

        let transformer = Arc::new(ArmableTransformer {
            armed: AtomicBool::new(false),
        });
        let coffer = Coffer::builder(config)
            .with_transformer(transformer.clone())
            .build();

        coffer.init().await.unwrap();
        let healthy = coffer.snapshot().await;
        assert_eq!(healthy.len(), 1);

        transformer.armed.store(true, Ordering::SeqCst);
        let err = coffer.init().await.unwrap_err();
        assert!(matches!(err, CofferError::Transform { .. }));

        // Old generation remains authoritative and retrievable.
        let after = coffer.snapshot().await;
        assert_eq!(after.generation(), healthy.generation());
        let key = dir.path().join("a.css");
        assert_eq!(after.get(&key).unwrap().content(), b"a{}");
    }

    #[tokio::test]
    async fn test_assets_are_immutable_across_rebuilds() {
        let dir = tempfile::tempdir().unwrap();
        let css = dir.path().join("site.css");
        fs::write(&css, b"a{color:red}").unwrap();

        let coffer = Coffer::new(config_for(dir.path()));
        coffer.init().await.unwrap();
        let before = coffer.asset(&css).await.unwrap();

        fs::write(&css, b"a{color:blue}").unwrap();
        coffer.init().await.unwrap();

        // The earlier Asset value is unchanged; the store serves a new one.
        assert_eq!(before.content(), b"a{color:red}");
        let after = coffer.asset(&css).await.unwrap();
        assert_eq!(after.content(), b"a{color:blue}");
    }
}
