use std::{path::PathBuf, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    store::{RecordId, RecordStore, StoreError},
    utils::clock::Clock,
};

use super::{Expense, ExpenseFilter, ExpenseInput, DEFAULT_CATEGORY};

/// Owns the expense document for the duration of a single command.
pub struct ExpenseTracker {
    store: RecordStore<Expense>,
    clock: Box<dyn Clock>,
}

/// Fields of an expense after validation.
struct ValidExpense {
    description: String,
    amount: Decimal,
    category: Option<String>,
}

impl ExpenseTracker {
    pub fn open(path: impl Into<PathBuf>, clock: Box<dyn Clock>) -> Result<Self, StoreError> {
        Ok(Self {
            store: RecordStore::load(path)?,
            clock,
        })
    }

    fn today(&self) -> NaiveDate {
        self.clock.time().date_naive()
    }

    /// Adds an expense dated `date`, or today when no date is given.
    pub fn add(
        &mut self,
        input: ExpenseInput,
        date: Option<NaiveDate>,
    ) -> Result<RecordId, StoreError> {
        let ValidExpense {
            description,
            amount,
            category,
        } = validate(input)?;
        let date = date.unwrap_or_else(|| self.today());

        self.store.insert_with(|id| Expense {
            id,
            date,
            description,
            amount,
            category: category.unwrap_or_else(|| DEFAULT_CATEGORY.into()),
        })
    }

    /// Overwrites description and amount. The category is only replaced when it differs from
    /// [DEFAULT_CATEGORY].
    pub fn update(&mut self, id: RecordId, input: ExpenseInput) -> Result<&Expense, StoreError> {
        if self.store.get(id).is_none() {
            return Err(StoreError::NotFound(id));
        }
        let ValidExpense {
            description,
            amount,
            category,
        } = validate(input)?;

        self.store.update(id, |expense| {
            expense.description = description;
            expense.amount = amount;
            match category {
                Some(category) if category != DEFAULT_CATEGORY => expense.category = category,
                _ => debug!("Keeping category {} of expense {id}", expense.category),
            }
            Ok(())
        })
    }

    pub fn delete(&mut self, id: RecordId) -> Result<Expense, StoreError> {
        self.store.remove(id)
    }

    /// Matching expenses in ascending ID order.
    pub fn list(&self, filter: &ExpenseFilter) -> Vec<&Expense> {
        let today = self.today();
        self.store
            .iter()
            .filter(|v| filter.matches(v, today))
            .collect()
    }

    /// Total amount of matching expenses. Zero when nothing matches.
    pub fn summary(&self, filter: &ExpenseFilter) -> Result<Decimal, StoreError> {
        self.list(filter)
            .into_iter()
            .try_fold(Decimal::ZERO, |total, expense| total.checked_add(expense.amount))
            .ok_or_else(|| StoreError::Overflow("Total of the selected expenses".into()))
    }
}

fn validate(
    ExpenseInput {
        description,
        amount,
        category,
    }: ExpenseInput,
) -> Result<ValidExpense, StoreError> {
    let description = description
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| StoreError::validation("Description not specified, see --help for details"))?;

    let amount = amount
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| StoreError::validation("Amount not specified, see --help for details"))?;
    let amount = Decimal::from_str(&amount).map_err(|e| {
        StoreError::validation(format!(
            "Can't convert amount {amount}, please use a correct value, e.g. 2.99: {e}"
        ))
    })?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(StoreError::validation(format!(
            "Amount can't be negative, got {amount}"
        )));
    }

    let category = category
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    Ok(ValidExpense {
        description,
        amount,
        category,
    })
}
