//! CLI command handler for CSV import

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::Settings;
use crate::display::format_import_report;
use crate::error::{LedgerError, LedgerResult};
use crate::models::UserId;
use crate::services::ImportService;
use crate::storage::ExpenseStore;

/// Import a CSV file for `user_id`
///
/// `reject_non_positive` forces the stricter import mode regardless of the
/// setting in `config.json`.
pub fn handle_import_command(
    store: &dyn ExpenseStore,
    settings: &Settings,
    user_id: UserId,
    file: &Path,
    reject_non_positive: bool,
) -> LedgerResult<()> {
    let handle = File::open(file).map_err(|e| {
        LedgerError::Import(format!("Failed to open {}: {}", file.display(), e))
    })?;

    let mut options = settings.import.options();
    options.reject_non_positive_amounts |= reject_non_positive;

    let report = ImportService::new(store)
        .with_options(options)
        .import(user_id, BufReader::new(handle))?;

    print!("{}", format_import_report(&report));
    Ok(())
}
