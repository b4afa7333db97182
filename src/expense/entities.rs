use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::{Record, RecordId};

/// Category assigned when none is given. On update it never replaces a custom category.
pub const DEFAULT_CATEGORY: &str = "general";

/// The struct used for storing expenses on the disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: RecordId,
    pub date: NaiveDate,
    pub description: String,
    /// Stored as a plain JSON number carrying the exact decimal digits.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub category: String,
}

impl Record for Expense {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Raw user input for creating or updating an expense. Everything is optional here, so that
/// missing mandatory fields are reported by the tracker instead of the argument parser.
#[derive(Debug, Clone, Default)]
pub struct ExpenseInput {
    pub description: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
}
