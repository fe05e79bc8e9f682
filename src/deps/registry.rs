//! Process-wide loadable-code registry.
//!
//! Installed dependency artifacts are appended to a registry the serving
//! runtime consumes when assembling its load path. Registration is
//! append-only; nothing is unloaded before the process restarts.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::ConsoleError;
use crate::logger;

/// Append-only registry of loadable code sources.
pub trait CodeRegistry: Send + Sync {
    /// Register an artifact so it becomes loadable by the serving runtime.
    fn register(&self, artifact: &Path) -> Result<(), ConsoleError>;
}

/// Default registry: records artifact locations in memory, in registration
/// order, for the runtime load-path assembly to pick up.
#[derive(Default)]
pub struct LibraryRegistry {
    sources: Mutex<Vec<PathBuf>>,
}

impl LibraryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered artifact paths, in registration order.
    pub fn sources(&self) -> Vec<PathBuf> {
        self.sources.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl CodeRegistry for LibraryRegistry {
    fn register(&self, artifact: &Path) -> Result<(), ConsoleError> {
        let mut sources = self
            .sources
            .lock()
            .map_err(|_| ConsoleError::Internal("Code registry lock poisoned".to_string()))?;
        sources.push(artifact.to_path_buf());
        logger::log_registered_artifact(artifact);
        Ok(())
    }
}
