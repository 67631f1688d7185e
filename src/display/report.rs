//! Report formatting helpers

use crate::models::{BudgetTable, YearTotal};

/// Truncate to at most `max_len` characters, ending in `...` when cut
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Years with their totals, newest first as given
pub fn format_year_totals(years: &[YearTotal], currency_symbol: &str) -> String {
    if years.is_empty() {
        return "No expenses recorded yet.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:<6} {:>14}\n", "Year", "Total"));
    output.push_str(&"-".repeat(21));
    output.push('\n');
    for year in years {
        output.push_str(&format!(
            "{:<6} {:>14}\n",
            year.year,
            year.total.format_with_symbol(currency_symbol)
        ));
    }
    output
}

/// Monthly limit per category
pub fn format_budget_table(budgets: &BudgetTable, currency_symbol: &str) -> String {
    if budgets.is_empty() {
        return "  (no budgets configured)\n".to_string();
    }

    budgets
        .iter()
        .map(|(category, limit)| {
            format!(
                "  {:<16} {:>12}\n",
                category.name(),
                limit.format_with_symbol(currency_symbol)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, Money};

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Café au lait", 7), "Café...");
        assert_eq!(truncate("abcdef", 2), "..");
    }

    #[test]
    fn test_format_year_totals() {
        let years = [
            YearTotal {
                year: 2025,
                total: Money::from_cents(123456),
            },
            YearTotal {
                year: 2024,
                total: Money::from_cents(50),
            },
        ];
        let output = format_year_totals(&years, "€");
        assert!(output.contains("2025"));
        assert!(output.contains("€1234.56"));
        assert!(output.find("2025") < output.find("2024"));
        assert_eq!(format_year_totals(&[], "€"), "No expenses recorded yet.\n");
    }

    #[test]
    fn test_format_budget_table() {
        let budgets =
            BudgetTable::empty().with_limit(ExpenseCategory::Transport, Money::from_cents(20000));
        let output = format_budget_table(&budgets, "$");
        assert!(output.contains("Transport"));
        assert!(output.contains("$200.00"));
        assert!(format_budget_table(&BudgetTable::empty(), "$").contains("no budgets"));
    }
}
