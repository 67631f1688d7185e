//! CLI commands for reports

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::display::format_year_totals;
use crate::error::{LedgerError, LedgerResult};
use crate::models::UserId;
use crate::reports::ReportEngine;
use crate::storage::ExpenseStore;

use super::expense::{today, PeriodArgs};

/// Arguments for `ledger dashboard`
#[derive(Args, Debug)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub period: PeriodArgs,
    /// Export the category breakdown to a CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Print the dashboard as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn handle_dashboard_command(
    store: &dyn ExpenseStore,
    settings: &Settings,
    user_id: UserId,
    args: DashboardArgs,
) -> LedgerResult<()> {
    let (year, month) = args.period.resolve(today());
    let engine = ReportEngine::new(store, settings.budgets.clone());
    let dashboard = engine.dashboard(user_id, year, month)?;

    if let Some(path) = args.output {
        let file = File::create(&path).map_err(|e| {
            LedgerError::Io(format!("Failed to create {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        dashboard.export_csv(&mut writer)?;
        println!("Dashboard exported to: {}", path.display());
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
    } else {
        print!("{}", dashboard.format_terminal(&settings.currency_symbol));
    }
    Ok(())
}

pub fn handle_years_command(
    store: &dyn ExpenseStore,
    settings: &Settings,
    user_id: UserId,
) -> LedgerResult<()> {
    let years = store.list_expenditure_years(user_id)?;
    print!("{}", format_year_totals(&years, &settings.currency_symbol));
    Ok(())
}
