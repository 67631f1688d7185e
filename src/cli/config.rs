//! `init` and `config` commands

use crate::config::{LedgerPaths, Settings};
use crate::display::format_budget_table;
use crate::error::LedgerResult;
use crate::storage::open_store;

/// Create the data directory, the database and a default `config.json`
pub fn handle_init_command(paths: &LedgerPaths, settings: &Settings) -> LedgerResult<()> {
    println!("Initializing expense ledger at: {}", paths.base_dir().display());

    open_store(paths)?;
    if !paths.is_initialized() {
        settings.save(paths)?;
    }

    println!("Database:  {}", paths.database_file().display());
    println!("Settings:  {}", paths.settings_file().display());
    println!("Initialization complete!");
    Ok(())
}

pub fn handle_config_command(paths: &LedgerPaths, settings: &Settings) -> LedgerResult<()> {
    println!("Expense Ledger Configuration");
    println!("============================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Database:       {}", paths.database_file().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!(
        "  Reject non-positive imports: {}",
        settings.import.reject_non_positive_amounts
    );
    println!("  Monthly budgets:");
    print!("{}", format_budget_table(&settings.budgets, &settings.currency_symbol));
    Ok(())
}
