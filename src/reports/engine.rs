//! Report engine
//!
//! Monthly totals, per-category breakdowns, budget alerts and the combined
//! dashboard, all computed through [`ExpenseStore`] aggregate queries.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::LedgerResult;
use crate::models::{BudgetTable, ExpenseCriteria, Money, UserId};
use crate::storage::ExpenseStore;

use super::alerts::{compute_alerts, BudgetAlert};
use super::dashboard::Dashboard;

/// Total and average for one stored category name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub total: Money,
    /// `None` only if the average query had no row for this category
    pub average: Option<Money>,
}

/// Read-only reporting over a store and a budget table
pub struct ReportEngine<'a> {
    store: &'a dyn ExpenseStore,
    budgets: BudgetTable,
}

impl<'a> ReportEngine<'a> {
    pub fn new(store: &'a dyn ExpenseStore, budgets: BudgetTable) -> Self {
        Self { store, budgets }
    }

    pub fn budgets(&self) -> &BudgetTable {
        &self.budgets
    }

    /// Sum of the user's expenses in a month; zero if there are none
    pub fn monthly_total(&self, user_id: UserId, year: i32, month: u32) -> LedgerResult<Money> {
        self.store
            .sum_amounts(&ExpenseCriteria::for_month(user_id, year, month))
    }

    /// Totals and averages per category for a month, ordered by category name
    pub fn category_breakdown(
        &self,
        user_id: UserId,
        year: i32,
        month: u32,
    ) -> LedgerResult<Vec<CategoryBreakdown>> {
        let criteria = ExpenseCriteria::for_month(user_id, year, month);
        let totals = self.store.sum_amounts_by_category(&criteria)?;
        let averages: BTreeMap<String, Money> = self
            .store
            .average_amounts_by_category(&criteria)?
            .into_iter()
            .map(|a| (a.category, a.average))
            .collect();

        Ok(totals
            .into_iter()
            .map(|t| CategoryBreakdown {
                average: averages.get(&t.category).copied(),
                category: t.category,
                total: t.total,
            })
            .collect())
    }

    pub fn budget_alerts(&self, breakdown: &[CategoryBreakdown]) -> Vec<BudgetAlert> {
        compute_alerts(breakdown, &self.budgets)
    }

    /// Years with at least one expense, newest first
    pub fn years_with_expenses(&self, user_id: UserId) -> LedgerResult<Vec<i32>> {
        Ok(self
            .store
            .list_expenditure_years(user_id)?
            .into_iter()
            .map(|y| y.year)
            .collect())
    }

    /// Everything the monthly dashboard shows
    pub fn dashboard(&self, user_id: UserId, year: i32, month: u32) -> LedgerResult<Dashboard> {
        let total = self.monthly_total(user_id, year, month)?;
        let breakdown = self.category_breakdown(user_id, year, month)?;
        let alerts = self.budget_alerts(&breakdown);
        let years = self.years_with_expenses(user_id)?;

        Ok(Dashboard {
            year,
            month,
            total,
            breakdown,
            alerts,
            years,
        })
    }
}
