//! Core traits for record sources.

mod source;

pub use source::{RecordSource, fetch_or_empty};
