//! Database schema
//!
//! The `users` relation belongs to the authentication layer, so `user_id`
//! is a plain integer column here.

use rusqlite::Connection;

use crate::error::LedgerResult;

/// Create the expenses table and its indexes if they are missing
pub fn run_migrations(conn: &Connection) -> LedgerResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            category TEXT NOT NULL,
            amount_cents INTEGER NOT NULL,
            description TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_expenses_user_date ON expenses(user_id, date)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category)",
        [],
    )?;

    Ok(())
}
