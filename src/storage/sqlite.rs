//! SQLite implementation of [`ExpenseStore`]
//!
//! Filters are composed from [`ExpenseCriteria`] into a WHERE clause of
//! fixed fragments; every value travels as a bound parameter.

use std::path::Path;

use rusqlite::{params, params_from_iter, Connection};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    CategoryAverage, CategoryTotal, Expense, ExpenseCriteria, ExpenseId, Money, UserId, YearTotal,
};

use super::rows::{format_date, ExpenseRow, EXPENSE_COLUMNS};
use super::schema::run_migrations;
use super::ExpenseStore;

/// Expense store backed by one SQLite connection
pub struct SqliteExpenseStore {
    conn: Connection,
}

impl SqliteExpenseStore {
    /// Open (or create) a database file and apply the schema
    pub fn open<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            LedgerError::Persistence(format!("Failed to open {}: {}", path.display(), e))
        })?;
        Self::with_connection(conn)
    }

    /// A private in-memory database, mostly for tests
    pub fn open_in_memory() -> LedgerResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    /// Wrap an existing connection and apply the schema
    pub fn with_connection(conn: Connection) -> LedgerResult<Self> {
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// The underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn insert(&self, expense: &Expense) -> LedgerResult<Expense> {
        self.conn.execute(
            "INSERT INTO expenses (user_id, date, category, amount_cents, description)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                expense.user_id.value(),
                format_date(expense.date),
                expense.category.name(),
                expense.amount.cents(),
                expense.description,
            ],
        )?;

        let id = ExpenseId::new(self.conn.last_insert_rowid());
        Ok(expense.clone().with_id(id))
    }

    fn update(&self, id: ExpenseId, expense: &Expense) -> LedgerResult<Expense> {
        let changed = self.conn.execute(
            "UPDATE expenses
             SET user_id = ?1, date = ?2, category = ?3, amount_cents = ?4, description = ?5
             WHERE id = ?6",
            params![
                expense.user_id.value(),
                format_date(expense.date),
                expense.category.name(),
                expense.amount.cents(),
                expense.description,
                id.value(),
            ],
        )?;

        if changed == 0 {
            return Err(LedgerError::expense_not_found(id));
        }
        Ok(expense.clone())
    }
}

/// Build the WHERE clause and its parameters for a criteria
fn where_clause(criteria: &ExpenseCriteria) -> (String, Vec<i64>) {
    let mut conditions = Vec::new();
    let mut values = Vec::new();

    if let Some(user_id) = criteria.user_id {
        conditions.push("user_id = ?");
        values.push(user_id.value());
    }
    if let Some(year) = criteria.year {
        conditions.push("CAST(strftime('%Y', date) AS INTEGER) = ?");
        values.push(i64::from(year));
    }
    if let Some(month) = criteria.month {
        conditions.push("CAST(strftime('%m', date) AS INTEGER) = ?");
        values.push(i64::from(month));
    }

    if conditions.is_empty() {
        (String::new(), values)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), values)
    }
}

fn to_sql_count(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl ExpenseStore for SqliteExpenseStore {
    fn find(&self, id: ExpenseId) -> LedgerResult<Option<Expense>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ?1"))?;
        let mut rows = stmt.query_map(params![id.value()], ExpenseRow::from_row)?;

        match rows.next() {
            Some(row) => Ok(Some(row?.into_expense()?)),
            None => Ok(None),
        }
    }

    fn save(&self, expense: &Expense) -> LedgerResult<Expense> {
        match expense.id {
            Some(id) => self.update(id, expense),
            None => self.insert(expense),
        }
    }

    fn delete(&self, id: ExpenseId) -> LedgerResult<()> {
        self.conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id.value()])?;
        Ok(())
    }

    fn find_by(
        &self,
        criteria: &ExpenseCriteria,
        offset: u64,
        limit: u64,
    ) -> LedgerResult<Vec<Expense>> {
        let (filter, mut values) = where_clause(criteria);
        values.push(to_sql_count(limit));
        values.push(to_sql_count(offset));

        let query = format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses{filter}
             ORDER BY date DESC, id ASC LIMIT ? OFFSET ?"
        );
        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map(params_from_iter(values.iter()), ExpenseRow::from_row)?;

        let mut expenses = Vec::new();
        for row in rows {
            expenses.push(row?.into_expense()?);
        }
        Ok(expenses)
    }

    fn count_by(&self, criteria: &ExpenseCriteria) -> LedgerResult<u64> {
        let (filter, values) = where_clause(criteria);
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM expenses{filter}"),
            params_from_iter(values.iter()),
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }

    fn sum_amounts(&self, criteria: &ExpenseCriteria) -> LedgerResult<Money> {
        let (filter, values) = where_clause(criteria);
        let total: i64 = self.conn.query_row(
            &format!("SELECT COALESCE(SUM(amount_cents), 0) FROM expenses{filter}"),
            params_from_iter(values.iter()),
            |row| row.get(0),
        )?;
        Ok(Money::from_cents(total))
    }

    fn sum_amounts_by_category(
        &self,
        criteria: &ExpenseCriteria,
    ) -> LedgerResult<Vec<CategoryTotal>> {
        let (filter, values) = where_clause(criteria);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT category, SUM(amount_cents) FROM expenses{filter}
             GROUP BY category ORDER BY category"
        ))?;
        let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                total: Money::from_cents(row.get(1)?),
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn average_amounts_by_category(
        &self,
        criteria: &ExpenseCriteria,
    ) -> LedgerResult<Vec<CategoryAverage>> {
        let (filter, values) = where_clause(criteria);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT category, CAST(ROUND(AVG(amount_cents)) AS INTEGER) FROM expenses{filter}
             GROUP BY category ORDER BY category"
        ))?;
        let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
            Ok(CategoryAverage {
                category: row.get(0)?,
                average: Money::from_cents(row.get(1)?),
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn list_expenditure_years(&self, user_id: UserId) -> LedgerResult<Vec<YearTotal>> {
        let mut stmt = self.conn.prepare(
            "SELECT CAST(strftime('%Y', date) AS INTEGER) AS year, SUM(amount_cents)
             FROM expenses
             WHERE user_id = ?1
             GROUP BY year
             ORDER BY year DESC",
        )?;
        let rows = stmt.query_map(params![user_id.value()], |row| {
            Ok(YearTotal {
                year: row.get(0)?,
                total: Money::from_cents(row.get(1)?),
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn begin(&self) -> LedgerResult<()> {
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    fn commit(&self) -> LedgerResult<()> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    fn rollback(&self) -> LedgerResult<()> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("ROLLBACK")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseCategory;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(user: i64, on: NaiveDate, category: ExpenseCategory, cents: i64) -> Expense {
        Expense::new(
            UserId::new(user),
            on,
            category,
            Money::from_cents(cents),
            format!("{} on {}", category, on),
        )
    }

    fn seeded_store() -> SqliteExpenseStore {
        let store = SqliteExpenseStore::open_in_memory().unwrap();
        let rows = [
            expense(1, date(2025, 1, 5), ExpenseCategory::Groceries, 2000),
            expense(1, date(2025, 1, 20), ExpenseCategory::Groceries, 3001),
            expense(1, date(2025, 1, 20), ExpenseCategory::Transport, 1500),
            expense(1, date(2025, 2, 1), ExpenseCategory::Housing, 90000),
            expense(1, date(2024, 12, 31), ExpenseCategory::Other, 700),
            expense(2, date(2025, 1, 10), ExpenseCategory::Groceries, 9999),
        ];
        for row in &rows {
            store.save(row).unwrap();
        }
        store
    }

    #[test]
    fn test_insert_assigns_id_and_round_trips() {
        let store = SqliteExpenseStore::open_in_memory().unwrap();
        let created = store
            .save(&expense(1, date(2025, 3, 1), ExpenseCategory::Utilities, 4250))
            .unwrap();

        let id = created.id.unwrap();
        let found = store.find(id).unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[test]
    fn test_update_in_place() {
        let store = SqliteExpenseStore::open_in_memory().unwrap();
        let mut created = store
            .save(&expense(1, date(2025, 3, 1), ExpenseCategory::Utilities, 4250))
            .unwrap();

        created.amount = Money::from_cents(5000);
        created.description = "Electricity".into();
        store.save(&created).unwrap();

        let found = store.find(created.id.unwrap()).unwrap().unwrap();
        assert_eq!(found.amount.cents(), 5000);
        assert_eq!(found.description, "Electricity");
        assert_eq!(store.count_by(&ExpenseCriteria::new()).unwrap(), 1);
    }

    #[test]
    fn test_update_missing_row_is_not_found() {
        let store = SqliteExpenseStore::open_in_memory().unwrap();
        let ghost = expense(1, date(2025, 3, 1), ExpenseCategory::Other, 1).with_id(ExpenseId::new(77));
        assert!(store.save(&ghost).unwrap_err().is_not_found());
    }

    #[test]
    fn test_find_missing_is_none() {
        let store = SqliteExpenseStore::open_in_memory().unwrap();
        assert!(store.find(ExpenseId::new(1)).unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let store = seeded_store();
        store.delete(ExpenseId::new(999)).unwrap();
        assert_eq!(store.count_by(&ExpenseCriteria::new()).unwrap(), 6);
    }

    #[test]
    fn test_delete_removes_row() {
        let store = seeded_store();
        store.delete(ExpenseId::new(1)).unwrap();
        assert!(store.find(ExpenseId::new(1)).unwrap().is_none());
    }

    #[test]
    fn test_find_by_filters_and_orders() {
        let store = seeded_store();
        let criteria = ExpenseCriteria::for_month(UserId::new(1), 2025, 1);

        let found = store.find_by(&criteria, 0, 10).unwrap();
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|e| e.user_id == UserId::new(1)));
        assert!(found.iter().all(|e| e.year() == 2025 && e.month() == 1));

        // newest first, equal dates by ascending id
        assert_eq!(found[0].date, date(2025, 1, 20));
        assert_eq!(found[1].date, date(2025, 1, 20));
        assert!(found[0].id < found[1].id);
        assert_eq!(found[2].date, date(2025, 1, 5));
    }

    #[test]
    fn test_find_by_paginates() {
        let store = SqliteExpenseStore::open_in_memory().unwrap();
        for day in 1..=25 {
            store
                .save(&expense(1, date(2025, 5, day), ExpenseCategory::Other, 100))
                .unwrap();
        }
        let criteria = ExpenseCriteria::new().user(UserId::new(1));

        let first = store.find_by(&criteria, 0, 10).unwrap();
        let third = store.find_by(&criteria, 20, 10).unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].date, date(2025, 5, 25));
        assert_eq!(third.len(), 5);
        assert_eq!(third[4].date, date(2025, 5, 1));
    }

    #[test]
    fn test_count_matches_find_by() {
        let store = seeded_store();
        for criteria in [
            ExpenseCriteria::new(),
            ExpenseCriteria::new().user(UserId::new(1)),
            ExpenseCriteria::new().year(2025),
            ExpenseCriteria::new().month(1),
            ExpenseCriteria::for_month(UserId::new(2), 2025, 1),
            ExpenseCriteria::for_month(UserId::new(3), 2025, 1),
        ] {
            let count = store.count_by(&criteria).unwrap();
            assert_eq!(store.find_by(&criteria, 0, count).unwrap().len() as u64, count);
        }
    }

    #[test]
    fn test_sum_amounts() {
        let store = seeded_store();
        let criteria = ExpenseCriteria::for_month(UserId::new(1), 2025, 1);
        let expected: Money = store
            .find_by(&criteria, 0, u64::MAX)
            .unwrap()
            .iter()
            .map(|e| e.amount)
            .sum();

        assert_eq!(store.sum_amounts(&criteria).unwrap(), expected);
        assert_eq!(expected.cents(), 6501);

        let empty = ExpenseCriteria::for_month(UserId::new(1), 2030, 1);
        assert_eq!(store.sum_amounts(&empty).unwrap(), Money::zero());
    }

    #[test]
    fn test_sum_and_average_by_category() {
        let store = seeded_store();
        let criteria = ExpenseCriteria::for_month(UserId::new(1), 2025, 1);

        let totals = store.sum_amounts_by_category(&criteria).unwrap();
        assert_eq!(
            totals,
            vec![
                CategoryTotal {
                    category: "Groceries".into(),
                    total: Money::from_cents(5001)
                },
                CategoryTotal {
                    category: "Transport".into(),
                    total: Money::from_cents(1500)
                },
            ]
        );

        let averages = store.average_amounts_by_category(&criteria).unwrap();
        assert_eq!(averages.len(), 2);
        // (2000 + 3001) / 2 = 2500.5 rounds to 2501
        assert_eq!(averages[0].category, "Groceries");
        assert_eq!(averages[0].average.cents(), 2501);
        assert_eq!(averages[1].average.cents(), 1500);
    }

    #[test]
    fn test_list_expenditure_years() {
        let store = seeded_store();
        let years = store.list_expenditure_years(UserId::new(1)).unwrap();
        assert_eq!(
            years,
            vec![
                YearTotal {
                    year: 2025,
                    total: Money::from_cents(96501)
                },
                YearTotal {
                    year: 2024,
                    total: Money::from_cents(700)
                },
            ]
        );
        assert!(store.list_expenditure_years(UserId::new(9)).unwrap().is_empty());
    }

    #[test]
    fn test_rollback_discards_writes() {
        let store = SqliteExpenseStore::open_in_memory().unwrap();
        store.begin().unwrap();
        store
            .save(&expense(1, date(2025, 3, 1), ExpenseCategory::Other, 100))
            .unwrap();
        store.rollback().unwrap();

        assert_eq!(store.count_by(&ExpenseCriteria::new()).unwrap(), 0);
        // rollback outside a transaction is harmless
        store.rollback().unwrap();
    }

    #[test]
    fn test_commit_keeps_writes() {
        let store = SqliteExpenseStore::open_in_memory().unwrap();
        store.begin().unwrap();
        store
            .save(&expense(1, date(2025, 3, 1), ExpenseCategory::Other, 100))
            .unwrap();
        store.commit().unwrap();
        assert_eq!(store.count_by(&ExpenseCriteria::new()).unwrap(), 1);
    }

    #[test]
    fn test_file_database_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.db");

        {
            let store = SqliteExpenseStore::open(&path).unwrap();
            store
                .save(&expense(1, date(2025, 3, 1), ExpenseCategory::Other, 100))
                .unwrap();
        }

        let reopened = SqliteExpenseStore::open(&path).unwrap();
        assert_eq!(reopened.count_by(&ExpenseCriteria::new()).unwrap(), 1);
    }
}
