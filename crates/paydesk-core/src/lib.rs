//! paydesk-core - Record model and browsing engine for the paydesk back-office.

pub mod banks;
pub mod browse;
pub mod error;
pub mod export;
pub mod mask;
pub mod record;
pub mod traits;
pub mod types;

pub use browse::{FilterCriteria, PageRequest, PageResult, RawCriteria, apply, apply_in};
pub use error::Error;
pub use mask::Masker;
pub use record::{EntityFieldMap, Record};
pub use traits::{RecordSource, fetch_or_empty};
pub use types::{EntityKind, SourceUrl};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
