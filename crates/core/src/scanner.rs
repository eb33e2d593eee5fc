use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Everything one walk of the asset root produced.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Files whose extension matched a filter, in discovery order.
    pub files: Vec<PathBuf>,
    /// Every directory visited, root included. The watcher subscribes to
    /// each of these.
    pub dirs: Vec<PathBuf>,
}

/// Enumerates asset files under a root directory by extension.
pub struct PathScanner {
    extensions: Vec<String>,
}

impl PathScanner {
    /// Extension filters may be given with or without the leading dot.
    pub fn new(extensions: &[String]) -> Self {
        Self {
            extensions: extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// Walk `root` and collect matching files plus all visited directories.
    ///
    /// A missing root yields an empty outcome, not an error; any other walk
    /// failure aborts the scan. Paths are returned exactly as enumerated
    /// from `root`, and those paths are the store's lookup keys.
    pub fn scan(&self, root: &Path) -> Result<ScanOutcome> {
        let mut outcome = ScanOutcome::default();
        if !root.exists() {
            return Ok(outcome);
        }

        for entry in WalkDir::new(root) {
            let entry = entry.map_err(std::io::Error::from)?;
            let path = entry.path();
            if entry.file_type().is_dir() {
                outcome.dirs.push(path.to_path_buf());
            } else if entry.file_type().is_file() && self.matches(path) {
                outcome.files.push(path.to_path_buf());
            }
        }

        Ok(outcome)
    }

    fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = ext.to_ascii_lowercase();
        self.extensions.iter().any(|e| *e == ext)
    }
}
