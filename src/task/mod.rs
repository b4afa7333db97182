//! Task tracking on top of [RecordStore](crate::store::RecordStore).

pub mod entities;
pub mod tracker;

pub use entities::{Task, TaskStatus};
pub use tracker::TaskTracker;
