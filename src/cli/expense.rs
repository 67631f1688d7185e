//! Expense CLI commands
//!
//! add, edit, delete, show and list for the acting user.

use chrono::{Datelike, NaiveDate};
use clap::Args;

use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_page};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{ExpenseId, UserId};
use crate::services::{ExpenseInput, LedgerService};
use crate::storage::ExpenseStore;

/// Arguments for `ledger add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount in major units, e.g. "12.50" or "12,50"
    #[arg(allow_hyphen_values = true)]
    pub amount: String,
    pub description: String,
    /// One of Groceries, Utilities, Transport, Entertainment, Housing, Healthcare, Other
    #[arg(short, long)]
    pub category: String,
    /// Expense date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Arguments for `ledger edit`; omitted fields keep their value
#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: ExpenseId,
    #[arg(short, long, allow_hyphen_values = true)]
    pub amount: Option<String>,
    #[arg(short = 'm', long)]
    pub description: Option<String>,
    #[arg(short, long)]
    pub category: Option<String>,
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Month selection shared by `list` and `dashboard`
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct PeriodArgs {
    /// Year, defaults to the current year
    #[arg(short, long)]
    pub year: Option<i32>,
    /// Month (1-12), defaults to the current month
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
}

impl PeriodArgs {
    /// The selected year and month, filling gaps from `today`
    pub fn resolve(&self, today: NaiveDate) -> (i32, u32) {
        (
            self.year.unwrap_or_else(|| today.year()),
            self.month.unwrap_or_else(|| today.month()),
        )
    }
}

/// Arguments for `ledger list`
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub period: PeriodArgs,
    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: u64,
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a typed amount, accepting a comma as decimal separator
///
/// Text that is not a number becomes NaN so the ledger reports it together
/// with every other invalid field.
fn parse_amount(raw: &str) -> f64 {
    raw.trim().replace(',', ".").parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_date(raw: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::Config(format!("Invalid date format: '{}'. Use YYYY-MM-DD", raw))
    })
}

pub fn handle_add(
    store: &dyn ExpenseStore,
    settings: &Settings,
    user_id: UserId,
    args: AddArgs,
) -> LedgerResult<()> {
    let date = match &args.date {
        Some(raw) => parse_date(raw)?,
        None => today(),
    };
    let input = ExpenseInput::new(parse_amount(&args.amount), args.description, date, args.category);

    let expense = LedgerService::new(store).create(user_id, input)?;

    println!("Created expense:");
    print!("{}", format_expense_details(&expense, &settings.currency_symbol));
    Ok(())
}

pub fn handle_edit(
    store: &dyn ExpenseStore,
    settings: &Settings,
    user_id: UserId,
    args: EditArgs,
) -> LedgerResult<()> {
    let service = LedgerService::new(store);
    let existing = service.find_owned(user_id, args.id)?;

    let amount = match &args.amount {
        Some(raw) => parse_amount(raw),
        None => existing.amount.cents() as f64 / 100.0,
    };
    let date = match &args.date {
        Some(raw) => parse_date(raw)?,
        None => existing.date,
    };
    let input = ExpenseInput::new(
        amount,
        args.description
            .unwrap_or_else(|| existing.description.clone()),
        date,
        args.category
            .unwrap_or_else(|| existing.category.name().to_string()),
    );

    let updated = service.update(&existing, input)?;

    println!("Updated expense:");
    print!("{}", format_expense_details(&updated, &settings.currency_symbol));
    Ok(())
}

pub fn handle_delete(store: &dyn ExpenseStore, user_id: UserId, id: ExpenseId) -> LedgerResult<()> {
    let deleted = LedgerService::new(store).delete(user_id, id)?;
    println!("Deleted expense {} ({})", id, deleted.description);
    Ok(())
}

pub fn handle_show(
    store: &dyn ExpenseStore,
    settings: &Settings,
    user_id: UserId,
    id: ExpenseId,
) -> LedgerResult<()> {
    let expense = LedgerService::new(store).find_owned(user_id, id)?;
    print!("{}", format_expense_details(&expense, &settings.currency_symbol));
    Ok(())
}

pub fn handle_list(
    store: &dyn ExpenseStore,
    settings: &Settings,
    user_id: UserId,
    args: ListArgs,
) -> LedgerResult<()> {
    let (year, month) = args.period.resolve(today());
    let page = LedgerService::new(store).list(user_id, year, month, args.page)?;

    println!("Expenses for {}-{:02}", year, month);
    println!();
    print!("{}", format_expense_page(&page, &settings.currency_symbol));
    Ok(())
}
