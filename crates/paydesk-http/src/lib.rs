//! paydesk-http - Record source backed by the gateway REST API.

mod client;
mod endpoints;
mod source;

pub use client::ApiClient;
pub use source::{DEFAULT_BULK_LIMIT, DEFAULT_TIMEOUT, HttpConfig, HttpSource};
