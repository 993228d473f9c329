//! Gateway records and the field roles used to browse them.
//!
//! A [`Record`] is an opaque JSON object. An [`EntityFieldMap`] names which
//! of its fields act as id, status, bank code, timestamp, amount and
//! searchable text, so one engine can serve every entity.

mod fields;
mod payload;
mod value;

pub use fields::EntityFieldMap;
pub(crate) use fields::parse_amount;
pub use payload::records_from_payload;
pub use value::Record;
