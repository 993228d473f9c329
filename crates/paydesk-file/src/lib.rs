//! paydesk-file - Record source backed by a directory of JSON snapshots.

mod source;
mod store;

pub use source::FileSource;
pub use store::{SnapshotMeta, SnapshotStore};
