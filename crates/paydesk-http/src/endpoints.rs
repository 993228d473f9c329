//! Request and response shapes of the gateway API.

use serde::{Deserialize, Serialize};

use paydesk_core::EntityKind;

/// Path of the list endpoint for an entity.
pub(crate) fn list_path(kind: EntityKind) -> String {
    format!("api/{}", kind.segment())
}

/// Query for a bulk list call.
///
/// The API pages server-side; asking for one very large page approximates
/// fetching the whole collection.
#[derive(Debug, Serialize)]
pub(crate) struct BulkQuery {
    pub page: u32,
    pub limit: u32,
}

/// Error body returned by the API on failure.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}
