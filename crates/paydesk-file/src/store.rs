//! Filesystem layout of a snapshot directory.
//!
//! ```text
//! <root>/
//!   banks.json
//!   members.json
//!   transfers.json
//!   qr-payments.json
//!   snapshot.json      (optional metadata)
//! ```

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tracing::{debug, instrument};

use paydesk_core::error::Error;
use paydesk_core::{EntityKind, Record, Result};

/// Metadata written next to the collection files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMeta {
    /// Where the records were fetched from.
    pub source: String,
    /// RFC 3339 time the snapshot was taken.
    pub taken_at: String,
    /// Record count per collection segment.
    pub counts: BTreeMap<String, usize>,
}

impl SnapshotMeta {
    /// Start metadata for a snapshot of `source` taken now.
    pub fn now(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            taken_at: Utc::now().to_rfc3339(),
            counts: BTreeMap::new(),
        }
    }
}

/// Reads and writes the collection files of one snapshot directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the collection file for `kind`.
    pub fn collection_path(&self, kind: EntityKind) -> PathBuf {
        self.root.join(format!("{}.json", kind.segment()))
    }

    fn meta_path(&self) -> PathBuf {
        self.root.join("snapshot.json")
    }

    /// Read the raw payload for `kind`; `None` if the file does not exist.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn read(&self, kind: EntityKind) -> Result<Option<Value>> {
        let path = self.collection_path(kind);

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No snapshot file");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let value = serde_json::from_str(&content)
            .map_err(|e| Error::decode(format!("{}: {}", path.display(), e)))?;

        Ok(Some(value))
    }

    /// Write `records` as the collection for `kind`.
    ///
    /// The file is written to a temporary name and renamed into place.
    #[instrument(skip(self, records), fields(root = %self.root.display(), count = records.len()))]
    pub async fn write(&self, kind: EntityKind, records: &[Record]) -> Result<PathBuf> {
        let path = self.collection_path(kind);
        let content = serde_json::to_string_pretty(records).map_err(Error::decode)?;

        self.write_atomic(&path, &content).await?;

        debug!(path = %path.display(), "Wrote snapshot");
        Ok(path)
    }

    /// Read the snapshot metadata, if present.
    pub async fn read_meta(&self) -> Result<Option<SnapshotMeta>> {
        match fs::read_to_string(self.meta_path()).await {
            Ok(content) => serde_json::from_str(&content)
                .map(Some)
                .map_err(Error::decode),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the snapshot metadata.
    pub async fn write_meta(&self, meta: &SnapshotMeta) -> Result<()> {
        let content = serde_json::to_string_pretty(meta).map_err(Error::decode)?;
        self.write_atomic(&self.meta_path(), &content).await
    }

    async fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content).await?;
        fs::rename(&temp_path, path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn collection_paths_use_segments() {
        let store = SnapshotStore::new("/data/snap");
        assert_eq!(
            store.collection_path(EntityKind::QrPayment),
            PathBuf::from("/data/snap/qr-payments.json")
        );
    }

    #[tokio::test]
    async fn missing_file_reads_none() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path());
        assert!(store.read(EntityKind::Bank).await.unwrap().is_none());
        assert!(store.read_meta().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn write_then_read() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("nested"));
        let records = vec![Record::new(json!({"id": "T1", "amount": 10})).unwrap()];

        let path = store.write(EntityKind::Transfer, &records).await.unwrap();
        assert!(path.ends_with("transfers.json"));

        let value = store.read(EntityKind::Transfer).await.unwrap().unwrap();
        assert_eq!(value, json!([{"id": "T1", "amount": 10}]));
    }

    #[tokio::test]
    async fn invalid_json_is_decode_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("members.json"), "{not json").unwrap();
        let store = SnapshotStore::new(dir.path());

        let err = store.read(EntityKind::Member).await.unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert!(err.to_string().contains("members.json"));
    }

    #[tokio::test]
    async fn meta_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path());
        let mut meta = SnapshotMeta::now("https://gateway.example.com/");
        meta.counts.insert("banks".to_string(), 3);

        store.write_meta(&meta).await.unwrap();
        assert_eq!(store.read_meta().await.unwrap(), Some(meta));
    }
}
