//! Expense display formatting

use crate::error::ValidationErrors;
use crate::models::{Expense, Page};
use crate::services::ImportReport;

use super::report::truncate;

/// One listing row: id, date, category, amount, description
pub fn format_expense_row(expense: &Expense, currency_symbol: &str) -> String {
    let id = expense
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{:>6}  {}  {:<13} {:>12}  {}",
        id,
        expense.date.format("%Y-%m-%d"),
        expense.category.name(),
        expense.amount.format_with_symbol(currency_symbol),
        truncate(&expense.description, 40)
    )
}

/// A page of expenses with a navigation footer
pub fn format_expense_page(page: &Page<Expense>, currency_symbol: &str) -> String {
    if page.total == 0 {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>6}  {:<10}  {:<13} {:>12}  {}\n",
        "ID", "Date", "Category", "Amount", "Description"
    ));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for expense in &page.items {
        output.push_str(&format_expense_row(expense, currency_symbol));
        output.push('\n');
    }

    output.push_str(&format!(
        "\nPage {} of {} ({} expenses)",
        page.page,
        page.total_pages.max(1),
        page.total
    ));
    if page.has_more {
        output.push_str(&format!(" - next: --page {}", page.page + 1));
    }
    output.push('\n');
    output
}

pub fn format_expense_details(expense: &Expense, currency_symbol: &str) -> String {
    let mut output = String::new();

    if let Some(id) = expense.id {
        output.push_str(&format!("Expense:     {}\n", id));
    }
    output.push_str(&format!("Date:        {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!("Description: {}\n", expense.description));

    output
}

/// Field errors, one per line
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|e| format!("  {}: {}\n", e.field, e.message))
        .collect()
}

/// Import summary, with every skipped row and its reason
pub fn format_import_report(report: &ImportReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("Imported {} expense(s)", report.imported));
    if report.skipped.is_empty() {
        output.push_str(".\n");
        return output;
    }

    output.push_str(&format!(", skipped {} row(s):\n", report.skipped.len()));
    for row in &report.skipped {
        output.push_str(&format!("  line {}: {}\n", row.line, row.reason));
    }
    output
}
