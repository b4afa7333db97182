use std::{fmt::Display, str::FromStr};

use anyhow::anyhow;
use chrono::NaiveDate;

use crate::{store::StoreError, utils::time::year_month};

use super::Expense;

/// How the year of an expense is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearFilter {
    /// The year of the current date.
    #[default]
    Current,
    /// Any year.
    None,
    Explicit(i32),
}

impl YearFilter {
    fn resolve(self, today: NaiveDate) -> Option<i32> {
        match self {
            YearFilter::Current => Some(year_month(today).0),
            YearFilter::None => None,
            YearFilter::Explicit(year) => Some(year),
        }
    }
}

impl Display for YearFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YearFilter::Current => write!(f, "current"),
            YearFilter::None => write!(f, "none"),
            YearFilter::Explicit(year) => write!(f, "{year}"),
        }
    }
}

impl FromStr for YearFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "current" => Ok(YearFilter::Current),
            "none" | "all" => Ok(YearFilter::None),
            v => v
                .parse::<i32>()
                .map(YearFilter::Explicit)
                .map_err(|_| anyhow!("Can't parse {s} into a year, expected current, none or a number")),
        }
    }
}

/// Selects expenses by month, year and category. All set conditions must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub month: Option<u32>,
    pub year: YearFilter,
    pub category: Option<String>,
}

impl ExpenseFilter {
    /// Builds a filter from user input. The month must be a number between 1 and 12.
    pub fn parse(
        month: Option<&str>,
        year: YearFilter,
        category: Option<String>,
    ) -> Result<Self, StoreError> {
        let month = month.map(parse_month).transpose()?;
        Ok(Self {
            month,
            year,
            category,
        })
    }

    /// Filter that matches every expense.
    pub fn all() -> Self {
        Self {
            year: YearFilter::None,
            ..Default::default()
        }
    }

    pub fn matches(&self, expense: &Expense, today: NaiveDate) -> bool {
        let (year, month) = year_month(expense.date);
        self.year.resolve(today).map_or(true, |v| v == year)
            && self.month.map_or(true, |v| v == month)
            && self
                .category
                .as_deref()
                .map_or(true, |v| v == expense.category)
    }
}

fn parse_month(value: &str) -> Result<u32, StoreError> {
    let month = value.trim().parse::<u32>().map_err(|_| {
        StoreError::validation(format!(
            "Failed filtering by month, the value must be between 1 and 12, got {value}"
        ))
    })?;
    if !(1..=12).contains(&month) {
        return Err(StoreError::validation(format!(
            "The month must be between 1 and 12, got {value}"
        )));
    }
    Ok(month)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::{expense::Expense, store::StoreError};

    use super::{ExpenseFilter, YearFilter};

    fn expense(date: NaiveDate, category: &str) -> Expense {
        Expense {
            id: 1,
            date,
            description: "test".into(),
            amount: dec!(1),
            category: category.into(),
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_year_filter_parsing() {
        assert_eq!("current".parse::<YearFilter>().unwrap(), YearFilter::Current);
        assert_eq!("none".parse::<YearFilter>().unwrap(), YearFilter::None);
        assert_eq!("2012".parse::<YearFilter>().unwrap(), YearFilter::Explicit(2012));
        assert!("last".parse::<YearFilter>().is_err());
        assert_eq!(YearFilter::Explicit(2012).to_string(), "2012");
    }

    #[test]
    fn test_invalid_months_are_rejected() {
        for month in ["0", "13", "abc", "", "-1"] {
            let result = ExpenseFilter::parse(Some(month), YearFilter::None, None);
            assert!(
                matches!(result, Err(StoreError::Validation(_))),
                "{month} should be rejected"
            );
        }
        assert_eq!(
            ExpenseFilter::parse(Some(" 8 "), YearFilter::None, None)
                .unwrap()
                .month,
            Some(8)
        );
    }

    #[test]
    fn test_current_year_is_taken_from_today() {
        let today = date(2024, 8, 15);
        let filter = ExpenseFilter::parse(Some("8"), YearFilter::Current, None).unwrap();

        assert!(filter.matches(&expense(date(2024, 8, 1), "general"), today));
        assert!(!filter.matches(&expense(date(2023, 8, 1), "general"), today));
        assert!(!filter.matches(&expense(date(2024, 7, 31), "general"), today));
    }

    #[test]
    fn test_month_without_year_matches_any_year() {
        let today = date(2024, 8, 15);
        let filter = ExpenseFilter::parse(Some("8"), YearFilter::None, None).unwrap();

        assert!(filter.matches(&expense(date(2019, 8, 3), "general"), today));
        assert!(!filter.matches(&expense(date(2019, 9, 3), "general"), today));
    }

    #[test]
    fn test_category_and_explicit_year() {
        let today = date(2024, 8, 15);
        let filter =
            ExpenseFilter::parse(None, YearFilter::Explicit(2020), Some("food".into())).unwrap();

        assert!(filter.matches(&expense(date(2020, 1, 1), "food"), today));
        assert!(!filter.matches(&expense(date(2020, 1, 1), "general"), today));
        assert!(!filter.matches(&expense(date(2024, 1, 1), "food"), today));
        assert!(ExpenseFilter::all().matches(&expense(date(1999, 1, 1), "x"), today));
    }
}
