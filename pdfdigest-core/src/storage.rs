//! Upload storage.
//!
//! One file per uploaded document, named by a generated UUID, under a
//! single upload directory. The store is deliberately dumb: no index, no
//! cache. Identifiers arriving from the outside are parsed as UUIDs
//! before they ever touch a path, so a request cannot name an arbitrary
//! file.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid document id: {0}")]
    InvalidId(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Identifier of one stored document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a caller-supplied identifier. Anything that is not a UUID is
    /// rejected here, before path construction.
    pub fn parse(s: &str) -> Result<Self, StorageError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| StorageError::InvalidId(s.to_string()))
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// File-per-document upload store
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the upload directory if it does not exist yet
    pub fn ensure_dir(&self) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Path of the file backing `id`
    pub fn path_for(&self, id: &DocumentId) -> PathBuf {
        self.root.join(format!("{id}.pdf"))
    }

    /// Whether a document with this id is currently stored
    pub fn exists(&self, id: &DocumentId) -> bool {
        self.path_for(id).exists()
    }

    /// Persist uploaded bytes under a fresh identifier
    pub async fn store(&self, bytes: &[u8]) -> Result<DocumentId, StorageError> {
        let id = DocumentId::new();
        let path = self.path_for(&id);
        tokio::fs::write(&path, bytes).await?;
        debug!("Stored {} bytes at {}", bytes.len(), path.display());
        Ok(id)
    }

    /// Remove a stored document. Idempotent: removing an id that is not
    /// (or no longer) present returns `Ok(false)`, which is also the
    /// outcome for the loser of a concurrent delete.
    pub async fn remove(&self, id: &DocumentId) -> Result<bool, StorageError> {
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, UploadStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_document_id_round_trip() {
        let id = DocumentId::new();
        let parsed = DocumentId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_document_id_rejects_non_uuid() {
        assert!(matches!(
            DocumentId::parse("../../etc/passwd"),
            Err(StorageError::InvalidId(_))
        ));
        assert!(DocumentId::parse("").is_err());
        assert!(DocumentId::parse("not-a-uuid").is_err());
    }

    #[tokio::test]
    async fn test_store_exists_remove() {
        let (_dir, store) = temp_store();

        let id = store.store(b"%PDF-1.5 fake").await.unwrap();
        assert!(store.exists(&id));
        assert!(store.path_for(&id).ends_with(format!("{id}.pdf")));

        let removed = store.remove(&id).await.unwrap();
        assert!(removed);
        assert!(!store.exists(&id));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let (_dir, store) = temp_store();

        let id = DocumentId::new();
        assert!(!store.exists(&id));
        // Removing something that was never stored is not an error
        assert!(!store.remove(&id).await.unwrap());
        // And doing it again still is not
        assert!(!store.remove(&id).await.unwrap());
    }
}
