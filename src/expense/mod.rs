//! Expense tracking on top of [RecordStore](crate::store::RecordStore).
//! Expenses are dated on creation and can be listed or summed per month and year.

pub mod entities;
pub mod filter;
pub mod tracker;

pub use entities::{Expense, ExpenseInput, DEFAULT_CATEGORY};
pub use filter::{ExpenseFilter, YearFilter};
pub use tracker::ExpenseTracker;
