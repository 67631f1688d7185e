//! Expense categories
//!
//! The ledger knows a fixed set of categories. User input and imported rows
//! must match a name exactly; rows read back from storage go through
//! [`normalize_category_name`] first since the store may hold any casing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Groceries,
    Utilities,
    Transport,
    Entertainment,
    Housing,
    Healthcare,
    Other,
}

impl ExpenseCategory {
    /// Every category, in display order
    pub const ALL: [ExpenseCategory; 7] = [
        Self::Groceries,
        Self::Utilities,
        Self::Transport,
        Self::Entertainment,
        Self::Housing,
        Self::Healthcare,
        Self::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Groceries => "Groceries",
            Self::Utilities => "Utilities",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Housing => "Housing",
            Self::Healthcare => "Healthcare",
            Self::Other => "Other",
        }
    }

    /// Exact, case-sensitive match against the category names
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// Match a name as stored, after normalizing its casing
    pub fn from_stored(name: &str) -> Option<Self> {
        Self::from_name(&normalize_category_name(name))
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExpenseCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A category name outside the fixed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown category: '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

/// First letter upper case, the rest lower case (`"gROCERIES"` -> `"Groceries"`)
pub fn normalize_category_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
