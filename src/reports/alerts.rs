//! Budget overrun alerts

use std::fmt;

use serde::Serialize;

use crate::models::{BudgetTable, ExpenseCategory, Money};

use super::engine::CategoryBreakdown;

/// A category whose spending went over its budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetAlert {
    pub category: ExpenseCategory,
    pub budget: Money,
    pub total: Money,
    /// `total - budget`, always positive
    pub overage: Money,
}

impl BudgetAlert {
    /// Alert text with a currency symbol, e.g. `Groceries budget exceeded by 50.00 €`
    pub fn message(&self, currency_symbol: &str) -> String {
        format!("{} {}", self, currency_symbol)
    }
}

impl fmt::Display for BudgetAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} budget exceeded by {}", self.category, self.overage)
    }
}

/// Compare each breakdown row against its budget
///
/// Stored category names are normalized before lookup; rows that still
/// match no budgeted category are ignored. Alerts keep the breakdown order.
pub fn compute_alerts(breakdown: &[CategoryBreakdown], budgets: &BudgetTable) -> Vec<BudgetAlert> {
    breakdown
        .iter()
        .filter_map(|row| {
            let (category, budget) = budgets.limit_for_name(&row.category)?;
            if row.total <= budget {
                return None;
            }
            let overage = row.total.checked_sub(budget)?;
            Some(BudgetAlert {
                category,
                budget,
                total: row.total,
                overage,
            })
        })
        .collect()
}
