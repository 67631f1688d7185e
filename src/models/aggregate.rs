//! Aggregate query results
//!
//! Category names are kept exactly as stored; consumers that need to match
//! them against the fixed category set normalize them first.

use serde::Serialize;

use super::money::Money;

/// Sum of amounts for one stored category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
}

/// Average amount for one stored category, rounded to the nearest cent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryAverage {
    pub category: String,
    pub average: Money,
}

/// A year in which a user recorded expenses, with that year's total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearTotal {
    pub year: i32,
    pub total: Money,
}
