//! Storage layer for the expense ledger
//!
//! [`ExpenseStore`] is the persistence contract the services depend on.
//! [`SqliteExpenseStore`] implements it on a single SQLite connection with
//! parameterized statements only.

pub mod init;
pub mod rows;
pub mod schema;
pub mod sqlite;

pub use init::open_store;
pub use rows::ExpenseRow;
pub use schema::run_migrations;
pub use sqlite::SqliteExpenseStore;

use crate::error::LedgerResult;
use crate::models::{
    CategoryAverage, CategoryTotal, Expense, ExpenseCriteria, ExpenseId, Money, UserId, YearTotal,
};

/// Persistence and query contract for expenses
pub trait ExpenseStore {
    /// Look up one expense by id
    fn find(&self, id: ExpenseId) -> LedgerResult<Option<Expense>>;

    /// Insert when `expense.id` is `None`, otherwise update the row in place
    ///
    /// Returns the stored expense, carrying its id. Updating an id with no
    /// row is a `NotFound` error.
    fn save(&self, expense: &Expense) -> LedgerResult<Expense>;

    /// Remove a row; deleting a missing id is a no-op
    fn delete(&self, id: ExpenseId) -> LedgerResult<()>;

    /// Matching expenses, newest date first, ties by ascending id
    fn find_by(
        &self,
        criteria: &ExpenseCriteria,
        offset: u64,
        limit: u64,
    ) -> LedgerResult<Vec<Expense>>;

    fn count_by(&self, criteria: &ExpenseCriteria) -> LedgerResult<u64>;

    /// Total of matching amounts; zero when nothing matches
    fn sum_amounts(&self, criteria: &ExpenseCriteria) -> LedgerResult<Money>;

    /// Totals per stored category name, ordered by name
    fn sum_amounts_by_category(&self, criteria: &ExpenseCriteria)
        -> LedgerResult<Vec<CategoryTotal>>;

    /// Averages per stored category name, rounded to the nearest cent.
    /// Categories without matches are absent.
    fn average_amounts_by_category(
        &self,
        criteria: &ExpenseCriteria,
    ) -> LedgerResult<Vec<CategoryAverage>>;

    /// Years with at least one expense for the user, newest first
    fn list_expenditure_years(&self, user_id: UserId) -> LedgerResult<Vec<YearTotal>>;

    /// Start a transaction spanning every following call until commit/rollback
    fn begin(&self) -> LedgerResult<()>;

    fn commit(&self) -> LedgerResult<()>;

    fn rollback(&self) -> LedgerResult<()>;
}
