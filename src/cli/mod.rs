//! CLI command handlers
//!
//! Bridges the clap argument types with the service and report layers.
//! Handlers print to stdout and return errors for `main` to report.

pub mod config;
pub mod expense;
pub mod import;
pub mod report;

pub use config::{handle_config_command, handle_init_command};
pub use expense::{
    handle_add, handle_delete, handle_edit, handle_list, handle_show, AddArgs, EditArgs, ListArgs,
    PeriodArgs,
};
pub use import::handle_import_command;
pub use report::{handle_dashboard_command, handle_years_command, DashboardArgs};
