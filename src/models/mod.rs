//! Core data models for the expense ledger
//!
//! Expenses, their categories and amounts, the typed query criteria, and the
//! result shapes returned by aggregate queries.

pub mod aggregate;
pub mod budget;
pub mod category;
pub mod criteria;
pub mod expense;
pub mod ids;
pub mod money;
pub mod page;

pub use aggregate::{CategoryAverage, CategoryTotal, YearTotal};
pub use budget::BudgetTable;
pub use category::{normalize_category_name, ExpenseCategory, UnknownCategory};
pub use criteria::ExpenseCriteria;
pub use expense::Expense;
pub use ids::{ExpenseId, UserId};
pub use money::{Money, MoneyParseError};
pub use page::{Page, PageRequest, PAGE_SIZE};
