//! Snapshot-directory record source.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, instrument};

use paydesk_core::error::{Error, InvalidInputError};
use paydesk_core::record::records_from_payload;
use paydesk_core::{EntityKind, Record, RecordSource, Result, SourceUrl};

use crate::store::SnapshotStore;

/// Bulk-fetches records from a directory of JSON snapshots.
///
/// A missing collection file is an empty collection.
#[derive(Debug, Clone)]
pub struct FileSource {
    store: SnapshotStore,
    url: SourceUrl,
}

impl FileSource {
    /// Create a source for a `file://` URL.
    ///
    /// # Errors
    ///
    /// Returns an error for network URLs or URLs with no local path.
    pub fn from_url(url: SourceUrl) -> Result<Self> {
        let root = url.snapshot_dir().map(Path::to_path_buf).ok_or_else(|| {
            Error::InvalidInput(InvalidInputError::SourceUrl {
                value: url.to_string(),
                reason: "not a local file:// URL".to_string(),
            })
        })?;

        Ok(Self {
            store: SnapshotStore::new(root),
            url,
        })
    }

    /// Create a source for a directory path.
    pub fn new(root: impl AsRef<Path>, url: SourceUrl) -> Self {
        Self {
            store: SnapshotStore::new(root),
            url,
        }
    }

    /// Access the underlying snapshot store.
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }
}

#[async_trait]
impl RecordSource for FileSource {
    fn url(&self) -> &SourceUrl {
        &self.url
    }

    #[instrument(skip(self), fields(source = %self.url))]
    async fn fetch_all(&self, kind: EntityKind) -> Result<Vec<Record>> {
        let Some(payload) = self.store.read(kind).await? else {
            return Ok(Vec::new());
        };

        let records = records_from_payload(payload)?;
        debug!(entity = %kind, count = records.len(), "Loaded snapshot");

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn file_url(path: &Path) -> SourceUrl {
        let url = url::Url::from_directory_path(path).unwrap();
        SourceUrl::new(url.as_str()).unwrap()
    }

    #[test]
    fn from_url_rejects_network() {
        let url = SourceUrl::new("https://gateway.example.com").unwrap();
        assert!(FileSource::from_url(url).is_err());
    }

    #[tokio::test]
    async fn missing_collection_is_empty() {
        let dir = TempDir::new().unwrap();
        let source = FileSource::new(dir.path(), file_url(dir.path()));
        assert!(source.fetch_all(EntityKind::Member).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reads_envelope_payload() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("transfers.json"),
            json!({"data": [{"id": "T1"}, {"id": "T2"}, "junk"]}).to_string(),
        )
        .unwrap();

        let source = FileSource::new(dir.path(), file_url(dir.path()));
        let records = source.fetch_all(EntityKind::Transfer).await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn from_url_uses_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("banks.json"), r#"[{"bankCode": "014"}]"#).unwrap();

        let source = FileSource::from_url(file_url(dir.path())).unwrap();
        assert_eq!(source.store().root(), dir.path());
        assert_eq!(source.fetch_all(EntityKind::Bank).await.unwrap().len(), 1);
    }
}
