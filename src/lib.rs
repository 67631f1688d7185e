//! Expense ledger and reporting engine
//!
//! Users record dated, categorized expenses. The crate validates and stores
//! them, answers criteria-driven listing and aggregate queries, flags
//! categories that overran their monthly budget, and bulk-imports expenses
//! from CSV as a single all-or-nothing batch.
//!
//! # Architecture
//!
//! - `models`: money, expenses, categories, criteria, pagination, budgets
//! - `storage`: the [`ExpenseStore`](storage::ExpenseStore) contract and its SQLite implementation
//! - `services`: validated expense lifecycle and CSV import
//! - `reports`: totals, category breakdowns, budget alerts, dashboard
//! - `config`: path resolution and JSON settings
//! - `cli` / `display`: the `ledger` binary's handlers and terminal formatting
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use expense_ledger::models::{BudgetTable, UserId};
//! use expense_ledger::reports::ReportEngine;
//! use expense_ledger::services::{ExpenseInput, LedgerService};
//! use expense_ledger::storage::SqliteExpenseStore;
//!
//! # fn main() -> expense_ledger::LedgerResult<()> {
//! let store = SqliteExpenseStore::open_in_memory()?;
//! let user = UserId::new(1);
//! let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
//!
//! LedgerService::new(&store).create(user, ExpenseInput::new(350.0, "Big shop", date, "Groceries"))?;
//!
//! let dashboard = ReportEngine::new(&store, BudgetTable::default()).dashboard(user, 2025, 3)?;
//! assert_eq!(dashboard.alerts[0].overage.to_string(), "50.00");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
