//! Monthly dashboard

use std::io::Write;

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;

use super::alerts::BudgetAlert;
use super::engine::CategoryBreakdown;

/// Month total, per-category breakdown, alerts and the year picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub year: i32,
    pub month: u32,
    pub total: Money,
    pub breakdown: Vec<CategoryBreakdown>,
    pub alerts: Vec<BudgetAlert>,
    /// Years with expenses, newest first
    pub years: Vec<i32>,
}

impl Dashboard {
    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }

    /// Format the dashboard for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Dashboard - {}-{:02}\n", self.year, self.month));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Total for month: {}\n",
            self.total.format_with_symbol(currency_symbol)
        ));

        if !self.alerts.is_empty() {
            output.push('\n');
            for alert in &self.alerts {
                output.push_str(&format!("! {}\n", alert.message(currency_symbol)));
            }
        }

        output.push('\n');
        if self.breakdown.is_empty() {
            output.push_str("No expenses recorded for this month.\n");
        } else {
            output.push_str(&format!(
                "{:<20} {:>14} {:>14}\n",
                "Category", "Total", "Average"
            ));
            output.push_str(&"-".repeat(60));
            output.push('\n');

            for row in &self.breakdown {
                let average = row
                    .average
                    .map(|a| a.format_with_symbol(currency_symbol))
                    .unwrap_or_else(|| "-".to_string());
                output.push_str(&format!(
                    "{:<20} {:>14} {:>14}\n",
                    row.category,
                    row.total.format_with_symbol(currency_symbol),
                    average
                ));
            }
        }

        if !self.years.is_empty() {
            let years: Vec<String> = self.years.iter().map(|y| y.to_string()).collect();
            output.push_str(&format!("\nYears with expenses: {}\n", years.join(", ")));
        }

        output
    }

    /// Export the category breakdown to CSV
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let io_err = |e: csv::Error| LedgerError::Io(e.to_string());

        csv.write_record(["Year", "Month", "Category", "Total", "Average", "Over Budget"])
            .map_err(io_err)?;

        for row in &self.breakdown {
            let overage = self
                .alerts
                .iter()
                .find(|a| a.category.name().eq_ignore_ascii_case(&row.category))
                .map(|a| a.overage.to_string())
                .unwrap_or_default();

            csv.write_record([
                self.year.to_string(),
                self.month.to_string(),
                row.category.clone(),
                row.total.to_string(),
                row.average.map(|a| a.to_string()).unwrap_or_default(),
                overage,
            ])
            .map_err(io_err)?;
        }

        csv.write_record([
            self.year.to_string(),
            self.month.to_string(),
            "TOTAL".to_string(),
            self.total.to_string(),
            String::new(),
            String::new(),
        ])
        .map_err(io_err)?;

        csv.flush()?;
        Ok(())
    }
}
