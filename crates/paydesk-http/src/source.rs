//! Gateway API record source.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use paydesk_core::error::{Error, InvalidInputError};
use paydesk_core::record::records_from_payload;
use paydesk_core::{EntityKind, Record, RecordSource, Result, SourceUrl};

use crate::client::ApiClient;
use crate::endpoints::{BulkQuery, list_path};

/// Page size requested for a bulk fetch.
pub const DEFAULT_BULK_LIMIT: u32 = 5000;

/// Request timeout for a bulk fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`HttpSource`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Bearer token sent with every request.
    pub token: Option<String>,
    /// Page size requested to approximate "fetch everything".
    pub bulk_limit: u32,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            token: None,
            bulk_limit: DEFAULT_BULK_LIMIT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Bulk-fetches records from the gateway REST API.
///
/// Each fetch is a single `GET <base>/api/<collection>?page=1&limit=<bulk_limit>`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: SourceUrl,
    client: ApiClient,
    bulk_limit: u32,
}

impl HttpSource {
    /// Create a source with default settings.
    pub fn new(url: SourceUrl) -> Result<Self> {
        Self::with_config(url, HttpConfig::default())
    }

    /// Create a source with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns an error for `file://` URLs, a zero bulk limit, or a token
    /// that cannot be sent as a header.
    pub fn with_config(url: SourceUrl, config: HttpConfig) -> Result<Self> {
        if !url.is_network() {
            return Err(Error::InvalidInput(InvalidInputError::SourceUrl {
                value: url.to_string(),
                reason: "not an http(s) URL".to_string(),
            }));
        }
        if config.bulk_limit == 0 {
            return Err(Error::InvalidInput(InvalidInputError::Other {
                message: "bulk limit must be greater than zero".to_string(),
            }));
        }

        let client = ApiClient::new(url.clone(), config.token.as_deref(), config.timeout)?;

        Ok(Self {
            url,
            client,
            bulk_limit: config.bulk_limit,
        })
    }

    /// The page size requested per bulk fetch.
    pub fn bulk_limit(&self) -> u32 {
        self.bulk_limit
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    fn url(&self) -> &SourceUrl {
        &self.url
    }

    #[instrument(skip(self), fields(source = %self.url))]
    async fn fetch_all(&self, kind: EntityKind) -> Result<Vec<Record>> {
        let query = BulkQuery {
            page: 1,
            limit: self.bulk_limit,
        };

        let payload = self.client.get_json(&list_path(kind), &query).await?;
        let records = records_from_payload(payload)?;

        debug!(entity = %kind, count = records.len(), "Fetched collection");
        if records.len() >= self.bulk_limit as usize {
            warn!(
                entity = %kind,
                limit = self.bulk_limit,
                "Bulk fetch hit the page limit; collection may be truncated"
            );
        }

        Ok(records)
    }
}
