//! Core paydesk types.
//!
//! These types enforce their invariants at construction time,
//! ensuring invalid states are unrepresentable.

mod entity;
mod source_url;

pub use entity::EntityKind;
pub use source_url::SourceUrl;
