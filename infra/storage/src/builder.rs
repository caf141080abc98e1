use crate::engine::{LocalStore, LocalStoreInner};
use crate::error::{StorageError, StorageErrorExt};
use crate::maintenance;
use parking_lot::RwLock;
use private::Sealed;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct NoPath;
#[derive(Debug)]
pub struct WithPath(PathBuf);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoPath {}
impl Sealed for WithPath {}

/// Builder for a file-backed [`LocalStore`].
#[derive(Debug)]
pub struct LocalStoreBuilder<S: Sealed = NoPath> {
    state: S,
    create: bool,
}

impl Default for LocalStoreBuilder<NoPath> {
    fn default() -> Self {
        Self { state: NoPath, create: true }
    }
}

impl LocalStoreBuilder<NoPath> {
    #[must_use = "Creates a new store builder that creates missing directories"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the JSON file the store persists to.
    #[must_use = "Sets the backing file of the store"]
    pub fn path(self, path: impl Into<PathBuf>) -> LocalStoreBuilder<WithPath> {
        LocalStoreBuilder { state: WithPath(path.into()), create: self.create }
    }
}

impl<S: Sealed> LocalStoreBuilder<S> {
    /// Whether missing parent directories are created on open (default `true`).
    #[must_use = "Sets whether the parent directory should be created"]
    pub const fn create(mut self, enable: bool) -> Self {
        self.create = enable;
        self
    }
}

impl LocalStoreBuilder<WithPath> {
    /// Opens the store, loading any previously persisted entries.
    ///
    /// Boot sequence:
    /// 1. Creates the parent directory when `create(true)` (the default).
    /// 2. Removes orphaned temp files left by interrupted writes.
    /// 3. Loads the JSON file. A missing file is an empty store; an unreadable one is
    ///    logged and replaced by an empty store on the next write.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created or the file exists
    /// but cannot be read.
    pub async fn open(self) -> Result<LocalStore, StorageError> {
        let path = self.state.0;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if self.create {
                fs::create_dir_all(parent)
                    .await
                    .context(format!("Failed to create store directory: {}", parent.display()))?;
            }
            maintenance::purge_tmp(parent, &path).await;
        }

        let entries = load_entries(&path).await?;
        info!(path = %path.display(), entries = entries.len(), "Opened local store");

        Ok(LocalStore {
            inner: Arc::new(LocalStoreInner {
                path: Some(path),
                entries: RwLock::new(entries),
                flush: Mutex::new(()),
                tmp_counter: AtomicU64::new(1),
            }),
        })
    }
}

async fn load_entries(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    let raw = match fs::read(path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(err) => {
            return Err(StorageError::Io {
                source: err,
                context: Some(format!("Failed to read store: {}", path.display()).into()),
            });
        },
    };

    match serde_json::from_slice::<BTreeMap<String, String>>(&raw) {
        Ok(entries) => Ok(entries),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Discarding unreadable local store");
            Ok(BTreeMap::new())
        },
    }
}
