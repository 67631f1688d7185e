//! Mapping between raw `expenses` rows and [`Expense`] values
//!
//! Every date and category parse for data read back from the database
//! happens here, so a malformed row surfaces as one persistence error.

use chrono::NaiveDate;
use rusqlite::Row;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseCategory, ExpenseId, Money, UserId};

/// Columns selected for every expense query, in [`ExpenseRow::from_row`] order
pub const EXPENSE_COLUMNS: &str = "id, user_id, date, category, amount_cents, description";

/// Storage format for the `date` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An `expenses` row exactly as the database returns it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRow {
    pub id: i64,
    pub user_id: i64,
    pub date: String,
    pub category: String,
    pub amount_cents: i64,
    pub description: String,
}

impl ExpenseRow {
    /// Read the columns listed in [`EXPENSE_COLUMNS`]
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            date: row.get(2)?,
            category: row.get(3)?,
            amount_cents: row.get(4)?,
            description: row.get(5)?,
        })
    }

    /// Convert into a typed expense
    pub fn into_expense(self) -> LedgerResult<Expense> {
        // Stored dates are plain dates, but tolerate a trailing time part.
        let date_part = self.date.get(..10).unwrap_or(self.date.as_str());
        let date = NaiveDate::parse_from_str(date_part, DATE_FORMAT).map_err(|e| {
            LedgerError::Persistence(format!(
                "Expense {} has an invalid date '{}': {}",
                self.id, self.date, e
            ))
        })?;

        let category = ExpenseCategory::from_stored(&self.category).ok_or_else(|| {
            LedgerError::Persistence(format!(
                "Expense {} has an unknown category '{}'",
                self.id, self.category
            ))
        })?;

        Ok(Expense {
            id: Some(ExpenseId::new(self.id)),
            user_id: UserId::new(self.user_id),
            date,
            category,
            amount: Money::from_cents(self.amount_cents),
            description: self.description,
        })
    }
}

/// Format a date for the `date` column
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
