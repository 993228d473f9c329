//! Record source trait.

use async_trait::async_trait;
use tracing::warn;

use crate::record::Record;
use crate::types::{EntityKind, SourceUrl};
use crate::{Error, Result};

/// Somewhere the complete collection of an entity can be bulk-fetched from.
///
/// A source returns every record it has for the entity in one call; the
/// browser then filters and pages locally.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Returns the URL this source reads from.
    fn url(&self) -> &SourceUrl;

    /// Fetch the full collection for `kind`.
    async fn fetch_all(&self, kind: EntityKind) -> Result<Vec<Record>>;
}

/// Fetch a collection, degrading a failure to an empty collection.
///
/// The error is handed back alongside so the caller can display it.
pub async fn fetch_or_empty<S>(source: &S, kind: EntityKind) -> (Vec<Record>, Option<Error>)
where
    S: RecordSource + ?Sized,
{
    match source.fetch_all(kind).await {
        Ok(records) => (records, None),
        Err(e) => {
            warn!(entity = %kind, source = %source.url(), error = %e, "Bulk fetch failed");
            (Vec::new(), Some(e))
        }
    }
}
