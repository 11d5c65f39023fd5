//! # Collection Store
//!
//! Whole-collection persistence for a [`ResourceActor`](crate::ResourceActor).
//!
//! A collection is an ordered sequence of flat records. The contract is deliberately
//! small: read everything, overwrite everything. The actor owning a collection is its
//! only writer, so no locking happens at this layer.
//!
//! Two backends ship with the crate:
//!
//! - [`JsonFileStore`] keeps one pretty-printed JSON array per collection on disk.
//! - [`MemoryStore`] keeps records in memory and can be switched unavailable to
//!   exercise storage failures in tests.
//!
//! `read_all` tolerates a missing or corrupt backing resource by returning an empty
//! collection. [`CollectionStore::probe`] is the strict variant used by health checks.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

/// Errors raised by a [`CollectionStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Collection '{collection}' I/O failure: {source}")]
    Io {
        collection: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Collection '{collection}' is corrupt: {source}")]
    Corrupt {
        collection: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Collection '{0}' is unavailable")]
    Unavailable(String),
}

/// Read/overwrite access to one named collection of records.
#[async_trait]
pub trait CollectionStore<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// The collection name (e.g. `orders`).
    fn name(&self) -> &str;

    /// Reads the full collection in stored order.
    ///
    /// A missing or unparseable backing resource yields an empty collection.
    async fn read_all(&self) -> Result<Vec<T>, StoreError>;

    /// Replaces the full collection.
    async fn write_all(&self, records: &[T]) -> Result<(), StoreError>;

    /// Checks that the collection can be read and decoded right now.
    async fn probe(&self) -> Result<(), StoreError>;
}

// =============================================================================
// JSON FILE BACKEND
// =============================================================================

/// Stores a collection as `<dir>/<name>.json`.
pub struct JsonFileStore<T> {
    name: String,
    dir: PathBuf,
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(dir: impl AsRef<Path>, name: impl Into<String>) -> Self {
        let name = name.into();
        let dir = dir.as_ref().to_path_buf();
        let path = dir.join(format!("{name}.json"));
        Self {
            name,
            dir,
            path,
            _records: PhantomData,
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            collection: self.name.clone(),
            source,
        }
    }
}

#[async_trait]
impl<T> CollectionStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_all(&self) -> Result<Vec<T>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(collection = %self.name, "Backing file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        match serde_json::from_slice(&bytes) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(collection = %self.name, error = %e, "Corrupt collection, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn write_all(&self, records: &[T]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records).map_err(|source| StoreError::Corrupt {
            collection: self.name.clone(),
            source,
        })?;

        // Write-then-rename so readers never observe a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| self.io_error(e))?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                warn!(collection = %self.name, error = %cleanup, "Could not remove temporary file");
            }
            return Err(self.io_error(e));
        }

        debug!(collection = %self.name, size = records.len(), "Collection written");
        Ok(())
    }

    async fn probe(&self) -> Result<(), StoreError> {
        let meta = tokio::fs::metadata(&self.dir)
            .await
            .map_err(|e| self.io_error(e))?;
        if !meta.is_dir() {
            return Err(self.io_error(std::io::Error::other(format!(
                "{} is not a directory",
                self.dir.display()
            ))));
        }

        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice::<Vec<T>>(&bytes)
                .map(|_| ())
                .map_err(|source| StoreError::Corrupt {
                    collection: self.name.clone(),
                    source,
                }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

// =============================================================================
// IN-MEMORY BACKEND
// =============================================================================

/// Keeps a collection in memory.
///
/// Clones share the same records, so a test can hand one clone to an actor and
/// inspect the collection through another.
pub struct MemoryStore<T> {
    name: String,
    records: Arc<Mutex<Vec<T>>>,
    available: Arc<AtomicBool>,
}

impl<T> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            records: Arc::clone(&self.records),
            available: Arc::clone(&self.available),
        }
    }
}

impl<T: Clone> MemoryStore<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_records(name, Vec::new())
    }

    pub fn with_records(name: impl Into<String>, records: Vec<T>) -> Self {
        Self {
            name: name.into(),
            records: Arc::new(Mutex::new(records)),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Current contents of the collection.
    pub fn snapshot(&self) -> Vec<T> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Makes every subsequent operation fail with [`StoreError::Unavailable`] (or succeed again).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(self.name.clone()))
        }
    }
}

#[async_trait]
impl<T> CollectionStore<T> for MemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_all(&self) -> Result<Vec<T>, StoreError> {
        self.check_available()?;
        Ok(self.snapshot())
    }

    async fn write_all(&self, records: &[T]) -> Result<(), StoreError> {
        self.check_available()?;
        *self.records.lock().unwrap_or_else(PoisonError::into_inner) = records.to_vec();
        Ok(())
    }

    async fn probe(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Loaf {
        id: String,
        weight: u32,
    }

    fn loaf(id: &str, weight: u32) -> Loaf {
        Loaf {
            id: id.to_string(),
            weight,
        }
    }

    #[tokio::test]
    async fn test_json_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::<Loaf>::new(dir.path(), "loaves");

        assert!(store.read_all().await.unwrap().is_empty());
        assert!(store.probe().await.is_ok());
    }

    #[tokio::test]
    async fn test_json_store_overwrites_and_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::<Loaf>::new(dir.path(), "loaves");

        store
            .write_all(&[loaf("b", 2), loaf("a", 1)])
            .await
            .unwrap();
        store.write_all(&[loaf("c", 3), loaf("b", 2)]).await.unwrap();

        let records = store.read_all().await.unwrap();
        assert_eq!(records, vec![loaf("c", 3), loaf("b", 2)]);
        assert!(!store.path().with_extension("json.tmp").exists());

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\n  {"), "expected pretty-printed JSON, got {text}");
    }

    #[tokio::test]
    async fn test_json_store_failed_rename_removes_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::<Loaf>::new(dir.path(), "loaves");
        // A non-empty directory where the file should go makes the rename fail.
        std::fs::create_dir(store.path()).unwrap();
        std::fs::write(store.path().join("keep"), b"x").unwrap();

        let result = store.write_all(&[loaf("a", 1)]).await;

        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_json_store_corrupt_file_reads_empty_but_fails_probe() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::<Loaf>::new(dir.path(), "loaves");
        std::fs::write(store.path(), b"{ not json").unwrap();

        assert!(store.read_all().await.unwrap().is_empty());
        assert!(matches!(
            store.probe().await,
            Err(StoreError::Corrupt { collection, .. }) if collection == "loaves"
        ));
    }

    #[tokio::test]
    async fn test_json_store_probe_fails_without_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let store = JsonFileStore::<Loaf>::new(&missing, "loaves");

        assert!(matches!(store.probe().await, Err(StoreError::Io { .. })));
        assert!(store.write_all(&[loaf("a", 1)]).await.is_err());
    }

    #[tokio::test]
    async fn test_memory_store_shares_records_and_toggles_availability() {
        let store = MemoryStore::new("loaves");
        let observer = store.clone();

        store.write_all(&[loaf("a", 1)]).await.unwrap();
        assert_eq!(observer.snapshot(), vec![loaf("a", 1)]);

        observer.set_available(false);
        assert!(matches!(
            store.read_all().await,
            Err(StoreError::Unavailable(name)) if name == "loaves"
        ));
        assert!(store.probe().await.is_err());

        observer.set_available(true);
        assert_eq!(store.read_all().await.unwrap().len(), 1);
    }
}
