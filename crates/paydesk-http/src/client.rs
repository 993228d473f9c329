//! HTTP client for the gateway API.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, trace};

use paydesk_core::SourceUrl;
use paydesk_core::error::{ApiError, Error, InvalidInputError, TransportError};

use crate::endpoints::ApiErrorResponse;

/// Map a reqwest failure onto the shared error type.
fn transport(err: reqwest::Error, timeout: Duration) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout {
            duration_ms: timeout.as_millis() as u64,
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

/// HTTP client for gateway API requests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: SourceUrl,
    timeout: Duration,
}

impl ApiClient {
    /// Create a client for the API at `base`.
    ///
    /// `token`, when given, is sent as a bearer token on every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the
    /// TLS backend cannot be initialised.
    pub fn new(base: SourceUrl, token: Option<&str>, timeout: Duration) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                InvalidInputError::Other {
                    message: "API token contains invalid characters".to_string(),
                }
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("paydesk/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| transport(e, timeout))?;

        Ok(Self {
            client,
            base,
            timeout,
        })
    }

    /// Returns the API base URL.
    pub fn base(&self) -> &SourceUrl {
        &self.base
    }

    /// GET a path below the base and parse the JSON body.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn get_json<Q>(&self, path: &str, query: &Q) -> Result<Value, Error>
    where
        Q: Serialize + std::fmt::Debug,
    {
        let url = self.base.endpoint(path);
        debug!(%url, "API request");
        trace!(?query, "query parameters");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| transport(e, self.timeout))?;

        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            response.json::<Value>().await.map_err(|e| {
                if e.is_decode() {
                    Error::decode(e)
                } else {
                    transport(e, self.timeout)
                }
            })
        } else {
            Err(Error::Api(Self::parse_error_response(response).await))
        }
    }

    /// Parse an API error response.
    async fn parse_error_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();

        match response.json::<ApiErrorResponse>().await {
            Ok(body) => ApiError::new(status, body.error, body.message),
            Err(_) => ApiError::new(status, None, None),
        }
    }
}
