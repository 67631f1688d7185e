//! Expense model
//!
//! An expense is a dated, categorized amount owned by one user. The id is
//! absent until the store assigns one on first insert.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ExpenseCategory;
use super::ids::{ExpenseId, UserId};
use super::money::Money;

/// A single ledger record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Store-assigned identifier, `None` before the first save
    pub id: Option<ExpenseId>,

    /// Owning user; fixed at creation
    pub user_id: UserId,

    pub date: NaiveDate,

    pub category: ExpenseCategory,

    /// Amount in cents
    pub amount: Money,

    /// Trimmed, non-empty description
    pub description: String,
}

impl Expense {
    /// Create an unsaved expense
    pub fn new(
        user_id: UserId,
        date: NaiveDate,
        category: ExpenseCategory,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            user_id,
            date,
            category,
            amount,
            description: description.into(),
        }
    }

    /// Same expense carrying a store-assigned id
    pub fn with_id(mut self, id: ExpenseId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.amount,
            self.description
        )
    }
}
