use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;

use crate::error::{CrlSetError, CrlSetResult};
use crate::set::CrlSet;
use crate::storage::{apply_delta, is_delta_update, parse, serialize};

/// Holds the currently trusted CRL set and swaps in replacements.
///
/// Publication is a pointer swap under the write lock: readers that already
/// hold an [`Arc<CrlSet>`] from [`current`](Self::current) keep using it
/// until they finish, and new readers see the replacement. A failed update
/// leaves the previous set published.
#[derive(Debug, Clone)]
pub struct CrlSetManager {
    cache: Arc<RwLock<Option<Arc<CrlSet>>>>,
    file_path: Option<PathBuf>,
}

impl CrlSetManager {
    /// Create a manager with no backing file
    pub fn new() -> Self {
        Self {
            cache: Arc::new(RwLock::new(None)),
            file_path: None,
        }
    }

    /// Create a manager that loads from and persists to the given path
    pub fn with_file_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            cache: Arc::new(RwLock::new(None)),
            file_path: Some(path.into()),
        }
    }

    /// Load and publish a full set from the configured file path.
    pub async fn load(&self) -> CrlSetResult<()> {
        let path = self.file_path.as_ref().ok_or(CrlSetError::NoFilePath)?;
        let bytes = fs::read(path).await?;
        let set = parse(&bytes)?;

        let mut cache = self.cache.write().await;
        tracing::info!(
            path = %path.display(),
            sequence = set.sequence(),
            "CRL set loaded from disk"
        );
        *cache = Some(Arc::new(set));
        Ok(())
    }

    /// Apply an update blob, full or delta, and publish the result.
    ///
    /// Full sets must advance the published sequence; deltas are gated by
    /// their `DeltaFrom` declaration and need a set to already be
    /// published. Any failure leaves the current set in place.
    pub async fn update(&self, bytes: &[u8]) -> CrlSetResult<u32> {
        if is_delta_update(bytes)? {
            let mut cache = self.cache.write().await;
            let base = cache.as_ref().ok_or(CrlSetError::NotLoaded)?;
            let next = apply_delta(base.as_ref(), bytes)?;
            let sequence = next.sequence();
            *cache = Some(Arc::new(next));
            tracing::info!(sequence, "published CRL set from delta update");
            Ok(sequence)
        } else {
            let next = parse(bytes)?;
            let mut cache = self.cache.write().await;
            if let Some(current) = cache.as_ref() {
                if next.sequence() <= current.sequence() {
                    return Err(CrlSetError::StaleSequence {
                        update: next.sequence(),
                        current: current.sequence(),
                    });
                }
            }
            let sequence = next.sequence();
            *cache = Some(Arc::new(next));
            tracing::info!(sequence, "published CRL set from full update");
            Ok(sequence)
        }
    }

    /// Publish a set directly, bypassing the wire format.
    pub async fn install(&self, set: CrlSet) {
        let mut cache = self.cache.write().await;
        tracing::info!(sequence = set.sequence(), "CRL set installed directly");
        *cache = Some(Arc::new(set));
    }

    /// The currently published set.
    pub async fn current(&self) -> CrlSetResult<Arc<CrlSet>> {
        let cache = self.cache.read().await;
        cache.clone().ok_or(CrlSetError::NotLoaded)
    }

    /// Whether a set has been published.
    pub async fn is_loaded(&self) -> bool {
        let cache = self.cache.read().await;
        cache.is_some()
    }

    /// Serialize the current set to the configured file path for the next
    /// process start.
    pub async fn persist(&self) -> CrlSetResult<()> {
        let path = self.file_path.as_ref().ok_or(CrlSetError::NoFilePath)?;
        let set = self.current().await?;
        let bytes = serialize(&set)?;
        fs::write(path, &bytes).await?;
        tracing::info!(
            path = %path.display(),
            sequence = set.sequence(),
            bytes = bytes.len(),
            "CRL set persisted"
        );
        Ok(())
    }
}

impl Default for CrlSetManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_set_bytes(sequence: u32) -> Vec<u8> {
        let set = CrlSet::for_testing(sequence, 0, Vec::new(), Vec::new());
        serialize(&set).unwrap()
    }

    fn empty_delta_bytes(sequence: u32, delta_from: u32) -> Vec<u8> {
        let json =
            format!(r#"{{"Version":0,"Sequence":{sequence},"DeltaFrom":{delta_from}}}"#);
        let mut bytes = (json.len() as u16).to_le_bytes().to_vec();
        bytes.extend_from_slice(json.as_bytes());
        bytes.push(0x00);
        bytes
    }

    #[tokio::test]
    async fn test_update_routing() {
        let manager = CrlSetManager::new();
        assert!(!manager.is_loaded().await);

        manager.update(&full_set_bytes(1)).await.unwrap();
        assert_eq!(manager.current().await.unwrap().sequence(), 1);

        manager.update(&empty_delta_bytes(2, 1)).await.unwrap();
        assert_eq!(manager.current().await.unwrap().sequence(), 2);
    }

    #[tokio::test]
    async fn test_delta_without_base_fails() {
        let manager = CrlSetManager::new();
        assert!(matches!(
            manager.update(&empty_delta_bytes(2, 1)).await,
            Err(CrlSetError::NotLoaded)
        ));
    }

    #[tokio::test]
    async fn test_stale_full_update_rejected() {
        let manager = CrlSetManager::new();
        manager.update(&full_set_bytes(5)).await.unwrap();
        assert!(matches!(
            manager.update(&full_set_bytes(5)).await,
            Err(CrlSetError::StaleSequence { update: 5, current: 5 })
        ));
        assert_eq!(manager.current().await.unwrap().sequence(), 5);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_previous_set() {
        let manager = CrlSetManager::new();
        manager.update(&full_set_bytes(1)).await.unwrap();

        // Mismatched delta base.
        assert!(manager.update(&empty_delta_bytes(9, 8)).await.is_err());
        // Corrupt bytes.
        assert!(manager.update(&[0xFF, 0xFF, 0xFF]).await.is_err());

        assert_eq!(manager.current().await.unwrap().sequence(), 1);
    }

    #[tokio::test]
    async fn test_readers_keep_old_set_across_update() {
        let manager = CrlSetManager::new();
        manager.update(&full_set_bytes(1)).await.unwrap();
        let held = manager.current().await.unwrap();

        manager.update(&full_set_bytes(2)).await.unwrap();
        assert_eq!(held.sequence(), 1);
        assert_eq!(manager.current().await.unwrap().sequence(), 2);
    }

    #[tokio::test]
    async fn test_persist_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crlset.bin");

        let manager = CrlSetManager::with_file_path(path.clone());
        manager.update(&full_set_bytes(3)).await.unwrap();
        manager.persist().await.unwrap();

        let reloaded = CrlSetManager::with_file_path(path);
        reloaded.load().await.unwrap();
        assert_eq!(reloaded.current().await.unwrap().sequence(), 3);
    }

    #[tokio::test]
    async fn test_no_file_path() {
        let manager = CrlSetManager::new();
        assert!(matches!(manager.load().await, Err(CrlSetError::NoFilePath)));
        assert!(matches!(
            manager.persist().await,
            Err(CrlSetError::NoFilePath)
        ));
    }
}
