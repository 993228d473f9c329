//! Record source wrapper for CLI use.

use anyhow::{Context, Result};
use async_trait::async_trait;

use paydesk_core::{EntityKind, Error, Record, RecordSource, SourceUrl};
use paydesk_file::FileSource;
use paydesk_http::HttpSource;

use crate::config::{Settings, TOKEN_ENV};

/// Either backend, chosen by the source URL scheme.
#[derive(Debug)]
pub enum CliSource {
    File(FileSource),
    Http(HttpSource),
}

impl CliSource {
    /// Open the source named by the resolved settings.
    pub fn open(settings: &Settings) -> Result<Self> {
        let url = settings.require_source()?.clone();

        if url.is_local() {
            let source = FileSource::from_url(url).context("Failed to open snapshot directory")?;
            Ok(CliSource::File(source))
        } else {
            let source = HttpSource::with_config(url, settings.http_config())
                .context("Failed to create API client")?;
            Ok(CliSource::Http(source))
        }
    }
}

#[async_trait]
impl RecordSource for CliSource {
    fn url(&self) -> &SourceUrl {
        match self {
            CliSource::File(source) => source.url(),
            CliSource::Http(source) => source.url(),
        }
    }

    async fn fetch_all(&self, kind: EntityKind) -> paydesk_core::Result<Vec<Record>> {
        match self {
            CliSource::File(source) => source.fetch_all(kind).await,
            CliSource::Http(source) => source.fetch_all(kind).await,
        }
    }
}

/// Fetch a collection and find the record whose id field equals `id`.
pub async fn find_record(
    source: &CliSource,
    settings: &Settings,
    kind: EntityKind,
    id: &str,
) -> Result<Record> {
    let records = source.fetch_all(kind).await.map_err(|e| {
        let context = fetch_failure(kind, &e);
        anyhow::Error::new(e).context(context)
    })?;

    let fields = settings.field_map(kind);
    let id = id.trim();
    records
        .into_iter()
        .find(|record| fields.id_of(record).as_deref() == Some(id))
        .with_context(|| format!("No {} with {} '{}'", kind, fields.id, id))
}

/// Describe a failed collection fetch, pointing at the token when the API
/// rejected the credentials.
pub fn fetch_failure(kind: EntityKind, err: &Error) -> String {
    let message = format!("Failed to fetch {}", kind.segment());
    match err {
        Error::Api(api) if api.is_auth_error() => {
            format!("{message}: credentials rejected, check --token or {TOKEN_ENV}")
        }
        _ => message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paydesk_core::error::{ApiError, TransportError};

    #[test]
    fn auth_failures_mention_the_token() {
        let unauthorized = Error::Api(ApiError::new(401, None, Some("expired".to_string())));
        let message = fetch_failure(EntityKind::Member, &unauthorized);
        assert!(message.starts_with("Failed to fetch members"));
        assert!(message.contains(TOKEN_ENV));

        let forbidden = Error::Api(ApiError::new(403, None, None));
        assert!(fetch_failure(EntityKind::Bank, &forbidden).contains("--token"));
    }

    #[test]
    fn other_failures_are_plain() {
        let server = Error::Api(ApiError::new(500, None, None));
        assert_eq!(fetch_failure(EntityKind::Transfer, &server), "Failed to fetch transfers");

        let timeout = Error::Transport(TransportError::Timeout { duration_ms: 10 });
        assert_eq!(fetch_failure(EntityKind::QrPayment, &timeout), "Failed to fetch qr-payments");
    }
}
