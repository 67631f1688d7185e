//! Reports for the expense ledger
//!
//! Monthly totals, category breakdowns, budget alerts and the dashboard
//! that bundles them.

pub mod alerts;
pub mod dashboard;
pub mod engine;

pub use alerts::{compute_alerts, BudgetAlert};
pub use dashboard::Dashboard;
pub use engine::{CategoryBreakdown, ReportEngine};
