//! Service layer for the expense ledger
//!
//! Services sit on top of an [`ExpenseStore`](crate::storage::ExpenseStore)
//! and own validation, ownership checks and the import pipeline.

pub mod import;
pub mod ledger;

pub use import::{ImportOptions, ImportReport, ImportService, SkipReason, SkippedRow};
pub use ledger::{ExpenseInput, LedgerService};
