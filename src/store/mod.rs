//!  Storage is organized through [record_store::RecordStore].
//!  The basic idea is:
//!   - Every tool owns a single JSON document, an object keyed by stringified record IDs.
//!   - The document is read once when the store is opened and rewritten as a whole after every
//!     mutation.
//!   - IDs are integers in memory and are derived from the keys present in the document, there is
//!     no persisted counter.

pub mod error;
pub mod record_store;

pub use error::StoreError;
pub use record_store::{Record, RecordId, RecordStore};
