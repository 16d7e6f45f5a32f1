// Application state module
// Holds the values shared read-only by every connection

use std::path::{Path, PathBuf};

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Canonical document root, fixed for the process lifetime
    pub document_root: PathBuf,
}

impl AppState {
    /// Create `AppState`, canonicalising the document root once
    pub fn new(config: Config, document_root: &Path) -> std::io::Result<Self> {
        Ok(Self {
            config,
            document_root: document_root.canonicalize()?,
        })
    }
}
