//! Small command line record keepers. Expenses and tasks are kept in local JSON documents through
//! a shared [store::RecordStore], the activity tool summarizes public GitHub events of a user.
//!

pub mod activity;
pub mod cli;
pub mod expense;
pub mod fs;
pub mod store;
pub mod task;
pub mod utils;
