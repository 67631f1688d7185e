//! Display formatting for terminal output

pub mod expense;
pub mod report;

pub use expense::{
    format_expense_details, format_expense_page, format_expense_row, format_import_report,
    format_validation_errors,
};
pub use report::{format_budget_table, format_year_totals, truncate};
