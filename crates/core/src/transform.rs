use std::collections::HashMap;
use std::path::Path;

pub type TransformError = Box<dyn std::error::Error + Send + Sync>;

/// Rewrites asset bytes for a content-type label (e.g. a minifier).
///
/// The cache only dispatches: it maps a file's extension to a label via
/// [`LabelMap`] and hands the bytes over. Extensions without a label are
/// passed through verbatim and the transformer is never consulted for them.
pub trait ContentTransformer: Send + Sync {
    fn transform(&self, label: &str, input: &[u8]) -> Result<Vec<u8>, TransformError>;
}

/// Mapping from file extension to the content-type label handed to the
/// transformer. Injected into the coffer so new content types can be added
/// without touching the cache core.
///
/// Extensions are stored without the leading dot; `label_for` accepts any
/// path and matches on its extension.
#[derive(Debug, Clone)]
pub struct LabelMap {
    labels: HashMap<String, String>,
}

impl LabelMap {
    pub fn empty() -> Self {
        Self {
            labels: HashMap::new(),
        }
    }

    /// Register a label for an extension (leading dot optional).
    pub fn with_label(mut self, extension: &str, label: &str) -> Self {
        self.labels.insert(
            extension.trim_start_matches('.').to_ascii_lowercase(),
            label.to_string(),
        );
        self
    }

    pub fn label_for(&self, path: &Path) -> Option<&str> {
        let ext = path.extension()?.to_str()?;
        self.labels.get(&ext.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for LabelMap {
    fn default() -> Self {
        Self::empty()
            .with_label("html", "text/html")
            .with_label("css", "text/css")
            .with_label("js", "text/javascript")
            .with_label("json", "application/json")
            .with_label("xml", "text/xml")
            .with_label("svg", "image/svg+xml")
    }
}
