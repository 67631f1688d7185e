//! Error types for the expense ledger
//!
//! A single error enum covers every failure the ledger surfaces to its
//! caller. Validation failures carry the full list of violated fields so a
//! form can show all of them at once.

use std::fmt;

use thiserror::Error;

/// A field of an expense that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseField {
    Amount,
    Description,
    Category,
}

impl ExpenseField {
    /// Form field name as used by callers
    pub fn name(&self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Description => "description",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for ExpenseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One violated field with a user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: ExpenseField,
    pub message: String,
}

/// Every field-level violation found while validating one expense
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for a field
    pub fn add(&mut self, field: ExpenseField, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether a given field is among the violations
    pub fn has(&self, field: ExpenseField) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Violated fields in the order they were found
    pub fn fields(&self) -> Vec<ExpenseField> {
        self.errors.iter().map(|e| e.field).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Turn the collected violations into a result
    pub fn into_result(self) -> Result<(), LedgerError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(LedgerError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// One or more field-level violations
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Lookup by identifier found nothing
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The acting user does not own the target expense
    #[error("User {user_id} does not own expense {expense_id}")]
    Ownership { expense_id: i64, user_id: i64 },

    /// The underlying store failed unexpectedly
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// A CSV import failed as a whole and was rolled back
    #[error("Import error: {0}")]
    Import(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl LedgerError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl fmt::Display) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_ownership(&self) -> bool {
        matches!(self, Self::Ownership { .. })
    }

    /// Field violations, if this is a validation error
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for LedgerError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::expense_not_found(42);
        assert_eq!(err.to_string(), "Expense not found: 42");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_collects_every_field() {
        let mut errors = ValidationErrors::new();
        errors.add(ExpenseField::Amount, "must be positive");
        errors.add(ExpenseField::Description, "is required");

        let err = errors.into_result().unwrap_err();
        assert!(err.is_validation());

        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert!(errors.has(ExpenseField::Amount));
        assert!(errors.has(ExpenseField::Description));
        assert!(!errors.has(ExpenseField::Category));
        assert_eq!(
            err.to_string(),
            "Validation error: amount: must be positive; description: is required"
        );
    }

    #[test]
    fn test_empty_validation_is_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_ownership_error() {
        let err = LedgerError::Ownership {
            expense_id: 7,
            user_id: 2,
        };
        assert!(err.is_ownership());
        assert_eq!(err.to_string(), "User 2 does not own expense 7");
    }

    #[test]
    fn test_from_sqlite_error() {
        let err: LedgerError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, LedgerError::Persistence(_)));
    }
}
