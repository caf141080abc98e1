//! The [`LocalStore`] handle and its atomic persistence.

use crate::builder::LocalStoreBuilder;
use crate::error::{StorageError, StorageErrorExt};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

/// Marker inserted into temp file names, see [`crate::maintenance`].
pub(crate) const TMP_MARKER: &str = ".fdtmp.";

/// Shared state behind a [`LocalStore`].
#[derive(Debug)]
pub struct LocalStoreInner {
    /// Backing file; `None` for in-memory stores.
    pub(crate) path: Option<PathBuf>,
    pub(crate) entries: RwLock<BTreeMap<String, String>>,
    /// Serializes flushes so an older snapshot never overwrites a newer one.
    pub(crate) flush: Mutex<()>,
    pub(crate) tmp_counter: AtomicU64,
}

/// A cloneable handle to a string key/value store.
///
/// Reads are synchronous and served from memory. Mutations are applied in memory and
/// then persisted atomically when the store is file-backed.
#[derive(Debug, Clone)]
pub struct LocalStore {
    pub(crate) inner: Arc<LocalStoreInner>,
}

impl Deref for LocalStore {
    type Target = LocalStoreInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl LocalStore {
    #[must_use = "The store is not opened until you call .open()"]
    pub fn builder() -> LocalStoreBuilder {
        LocalStoreBuilder::new()
    }

    /// A store that lives only as long as the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(LocalStoreInner {
                path: None,
                entries: RwLock::new(BTreeMap::new()),
                flush: Mutex::new(()),
                tmp_counter: AtomicU64::new(1),
            }),
        }
    }

    /// Backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.inner.path.is_some()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    /// Returns the value of the first key that holds a non-empty value.
    #[must_use]
    pub fn first_of(&self, keys: &[&str]) -> Option<String> {
        let entries = self.entries.read();
        keys.iter().find_map(|key| entries.get(*key).filter(|v| !v.is_empty()).cloned())
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for blank keys and [`StorageError::Io`] when
    /// the file cannot be written. The in-memory value is kept even if persisting fails.
    pub async fn set(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), StorageError> {
        let key = validate_key(key.into())?;
        self.entries.write().insert(key, value.into());
        self.flush().await
    }

    /// Removes `key`, returning whether it was present.
    pub async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let removed = self.entries.write().remove(key).is_some();
        if removed {
            self.flush().await?;
        }
        Ok(removed)
    }

    /// Removes every listed key with a single write, returning how many were present.
    pub async fn remove_all(&self, keys: &[&str]) -> Result<usize, StorageError> {
        let removed = {
            let mut entries = self.entries.write();
            keys.iter().filter(|key| entries.remove(**key).is_some()).count()
        };
        if removed > 0 {
            self.flush().await?;
        }
        Ok(removed)
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        self.entries.write().clear();
        self.flush().await
    }

    async fn flush(&self) -> Result<(), StorageError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        let _guard = self.inner.flush.lock().await;
        let snapshot = serde_json::to_vec_pretty(&*self.entries.read())
            .context("Failed to encode local store")?;

        let temp = unique_tmp_path(path, &self.tmp_counter);
        {
            let mut options = fs::OpenOptions::new();
            options.create_new(true).write(true);
            // Tokens live here: owner read/write only. The rename keeps the mode.
            #[cfg(unix)]
            options.mode(0o600);

            let mut file = options
                .open(&temp)
                .await
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(&snapshot).await.context("Write failed")?;
            file.sync_all().await.context("Sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StorageError::Io {
                source: err,
                context: Some(
                    format!("Atomic swap failed: {} -> {}", temp.display(), path.display()).into(),
                ),
            });
        }

        debug!(path = %path.display(), bytes = snapshot.len(), "Local store flushed");
        Ok(())
    }
}

fn validate_key(key: String) -> Result<String, StorageError> {
    if key.trim().is_empty() {
        return Err(StorageError::InvalidKey {
            message: "key cannot be blank".into(),
            context: None,
        });
    }
    Ok(key)
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let counter = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("store");
    target.with_file_name(format!("{file_name}{TMP_MARKER}{}.{counter}", std::process::id()))
}
