//! Storage initialization

use tracing::debug;

use crate::config::paths::LedgerPaths;
use crate::error::LedgerResult;

use super::sqlite::SqliteExpenseStore;

/// Create the data directory if needed and open the expense database
pub fn open_store(paths: &LedgerPaths) -> LedgerResult<SqliteExpenseStore> {
    paths.ensure_directories()?;

    let db_path = paths.database_file();
    debug!(path = %db_path.display(), "opening expense database");
    SqliteExpenseStore::open(db_path)
}
