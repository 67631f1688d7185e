//! CSV import service
//!
//! Reads headerless `date,amount,description,category` rows and stores them
//! as one all-or-nothing batch. Malformed rows are skipped and reported;
//! only a store failure aborts the batch, in which case nothing is kept.

use std::fmt;
use std::io::Read;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseCategory, Money, UserId};
use crate::storage::ExpenseStore;

/// Timestamp format of the date column
pub const IMPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Number of columns an importable row must have
const REQUIRED_FIELDS: usize = 4;

/// Knobs for the import pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Skip rows whose amount rounds to zero or below. Off by default, so
    /// imports accept amounts the interactive path would refuse.
    pub reject_non_positive_amounts: bool,
}

/// Why a row was not imported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    TooFewFields(usize),
    EmptyDescription,
    UnknownCategory(String),
    InvalidDate(String),
    /// The amount does not fit the cent range
    InvalidAmount(String),
    NonPositiveAmount(Money),
    /// The row could not be decoded (e.g. invalid UTF-8)
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewFields(n) => {
                write!(f, "expected {} fields, found {}", REQUIRED_FIELDS, n)
            }
            Self::EmptyDescription => write!(f, "description is empty"),
            Self::UnknownCategory(c) => write!(f, "unknown category '{}'", c),
            Self::InvalidDate(d) => write!(f, "invalid date '{}'", d),
            Self::InvalidAmount(a) => write!(f, "amount '{}' is out of range", a),
            Self::NonPositiveAmount(m) => write!(f, "amount {} is not positive", m),
            Self::Unreadable(e) => write!(f, "unreadable row: {}", e),
        }
    }
}

/// A row that was left out of the import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based line number in the input
    pub line: u64,
    pub reason: SkipReason,
}

/// Outcome of a committed import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: Vec<SkippedRow>,
}

/// A row that passed parsing, ready to persist
#[derive(Debug, Clone, PartialEq)]
struct ParsedRow {
    date: chrono::NaiveDate,
    amount: Money,
    description: String,
    category: ExpenseCategory,
}

/// Service for CSV import
pub struct ImportService<'a> {
    store: &'a dyn ExpenseStore,
    options: ImportOptions,
}

impl<'a> ImportService<'a> {
    pub fn new(store: &'a dyn ExpenseStore) -> Self {
        Self {
            store,
            options: ImportOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    /// Import every valid row for `user_id` inside one transaction
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Import` when the input cannot be read or the
    /// store rejects a write. The transaction is rolled back first, so no
    /// row from this input remains.
    pub fn import<R: Read>(&self, user_id: UserId, input: R) -> LedgerResult<ImportReport> {
        info!(user_id = %user_id, "starting CSV import");
        self.store.begin()?;

        let result = self
            .import_rows(user_id, input)
            .and_then(|report| self.store.commit().map(|_| report));

        match result {
            Ok(report) => {
                info!(
                    user_id = %user_id,
                    imported = report.imported,
                    skipped = report.skipped.len(),
                    "CSV import committed"
                );
                Ok(report)
            }
            Err(e) => {
                if let Err(rollback_err) = self.store.rollback() {
                    warn!(error = %rollback_err, "rollback after failed import also failed");
                }
                warn!(user_id = %user_id, error = %e, "CSV import rolled back");
                Err(LedgerError::Import(format!("import rolled back: {}", e)))
            }
        }
    }

    fn import_rows<R: Read>(&self, user_id: UserId, input: R) -> LedgerResult<ImportReport> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quote(b'"')
            .escape(Some(b'\\'))
            .from_reader(input);

        let mut report = ImportReport::default();
        let mut record = StringRecord::new();
        let mut line: u64 = 0;

        loop {
            let fallback_line = line + 1;
            match reader.read_record(&mut record) {
                Ok(false) => break,
                Ok(true) => {
                    line = record
                        .position()
                        .map(|p| p.line())
                        .unwrap_or(fallback_line);
                }
                Err(e) => {
                    line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
                    if let csv::ErrorKind::Io(_) = e.kind() {
                        return Err(LedgerError::Io(e.to_string()));
                    }
                    self.skip(&mut report, line, SkipReason::Unreadable(e.to_string()));
                    continue;
                }
            }

            let parsed = match parse_record(&record, &self.options) {
                Ok(parsed) => parsed,
                Err(reason) => {
                    self.skip(&mut report, line, reason);
                    continue;
                }
            };

            if !parsed.amount.is_positive() {
                warn!(line, amount = %parsed.amount, "importing non-positive amount");
            }

            let expense = Expense::new(
                user_id,
                parsed.date,
                parsed.category,
                parsed.amount,
                parsed.description,
            );
            self.store.save(&expense)?;
            report.imported += 1;
        }

        Ok(report)
    }

    fn skip(&self, report: &mut ImportReport, line: u64, reason: SkipReason) {
        debug!(line, reason = %reason, "skipping CSV row");
        report.skipped.push(SkippedRow { line, reason });
    }
}

/// Numeric value of the longest numeric prefix, after trimming and reading
/// `,` as the decimal separator
///
/// `"12abc"` reads as 12 and text without a leading number reads as 0.
fn leading_number(raw: &str) -> f64 {
    let normalized = raw.trim().replace(',', ".");
    let bytes = normalized.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    normalized[..end].parse().unwrap_or(0.0)
}

/// Turn one CSV record into an importable row
fn parse_record(record: &StringRecord, options: &ImportOptions) -> Result<ParsedRow, SkipReason> {
    if record.len() < REQUIRED_FIELDS {
        return Err(SkipReason::TooFewFields(record.len()));
    }

    let date_str = &record[0];
    let amount_str = &record[1];
    let description = record[2].trim();
    let category_str = &record[3];

    if description.is_empty() {
        return Err(SkipReason::EmptyDescription);
    }

    // Category must match exactly, surrounding whitespace included
    let category = ExpenseCategory::from_name(category_str)
        .ok_or_else(|| SkipReason::UnknownCategory(category_str.to_string()))?;

    let date = NaiveDateTime::parse_from_str(date_str.trim(), IMPORT_DATE_FORMAT)
        .map_err(|_| SkipReason::InvalidDate(date_str.trim().to_string()))?
        .date();

    let amount = Money::from_major_units(leading_number(amount_str))
        .ok_or_else(|| SkipReason::InvalidAmount(amount_str.trim().to_string()))?;

    if options.reject_non_positive_amounts && !amount.is_positive() {
        return Err(SkipReason::NonPositiveAmount(amount));
    }

    Ok(ParsedRow {
        date,
        amount,
        description: description.to_string(),
        category,
    })
}
