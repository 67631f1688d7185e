//! Per-category monthly budgets
//!
//! The table is plain configuration: it is loaded with the settings and
//! handed to the report engine, so tests and users can swap it freely.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::category::{normalize_category_name, ExpenseCategory};
use super::money::Money;

/// Category -> monthly budget in cents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetTable {
    limits: BTreeMap<ExpenseCategory, Money>,
}

impl BudgetTable {
    /// A table with no budgets at all
    pub fn empty() -> Self {
        Self {
            limits: BTreeMap::new(),
        }
    }

    /// Set (or replace) the budget for a category
    pub fn with_limit(mut self, category: ExpenseCategory, limit: Money) -> Self {
        self.limits.insert(category, limit);
        self
    }

    pub fn limit_for(&self, category: ExpenseCategory) -> Option<Money> {
        self.limits.get(&category).copied()
    }

    /// Look up a stored category name after normalizing its casing
    pub fn limit_for_name(&self, name: &str) -> Option<(ExpenseCategory, Money)> {
        let category = ExpenseCategory::from_name(&normalize_category_name(name))?;
        self.limit_for(category).map(|limit| (category, limit))
    }

    /// Categories whose configured limit is below zero
    pub fn negative_limits(&self) -> Vec<ExpenseCategory> {
        self.limits
            .iter()
            .filter(|(_, limit)| limit.is_negative())
            .map(|(category, _)| *category)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExpenseCategory, Money)> + '_ {
        self.limits.iter().map(|(c, m)| (*c, *m))
    }

    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}

impl Default for BudgetTable {
    fn default() -> Self {
        Self::empty()
            .with_limit(ExpenseCategory::Groceries, Money::from_cents(30000))
            .with_limit(ExpenseCategory::Utilities, Money::from_cents(50000))
            .with_limit(ExpenseCategory::Transport, Money::from_cents(20000))
            .with_limit(ExpenseCategory::Entertainment, Money::from_cents(15000))
            .with_limit(ExpenseCategory::Housing, Money::from_cents(10000))
            .with_limit(ExpenseCategory::Healthcare, Money::from_cents(5000))
            .with_limit(ExpenseCategory::Other, Money::from_cents(5000))
    }
}
