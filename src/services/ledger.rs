//! Ledger service
//!
//! Validated create, update and delete of expenses, ownership checks, and
//! the paginated monthly listing.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{ExpenseField, LedgerError, LedgerResult, ValidationErrors};
use crate::models::{
    Expense, ExpenseCategory, ExpenseCriteria, ExpenseId, Money, Page, PageRequest, UserId,
};
use crate::storage::ExpenseStore;

/// Raw, unvalidated expense fields as a caller supplies them
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseInput {
    /// Amount in major units, e.g. `12.50`
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
    pub category: String,
}

impl ExpenseInput {
    pub fn new(
        amount: f64,
        description: impl Into<String>,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            date,
            category: category.into(),
        }
    }
}

/// Fields that passed validation
struct ValidInput {
    amount: Money,
    description: String,
    category: ExpenseCategory,
}

/// Check every field and report all violations at once
fn validate(input: &ExpenseInput) -> LedgerResult<ValidInput> {
    let mut errors = ValidationErrors::new();

    let amount = if input.amount.is_finite() {
        let amount = Money::from_major_units(input.amount).filter(|m| m.is_positive());
        if amount.is_none() {
            errors.add(ExpenseField::Amount, "Amount must be positive.");
        }
        amount
    } else {
        errors.add(ExpenseField::Amount, "Amount must be a number.");
        None
    };

    let description = input.description.trim();
    if description.is_empty() {
        errors.add(ExpenseField::Description, "Description cannot be empty.");
    }

    let category_name = input.category.trim();
    let category = if category_name.is_empty() {
        errors.add(ExpenseField::Category, "Category cannot be empty.");
        None
    } else {
        let category = ExpenseCategory::from_name(category_name);
        if category.is_none() {
            errors.add(
                ExpenseField::Category,
                format!("Unknown category '{}'.", category_name),
            );
        }
        category
    };

    match (amount, category) {
        (Some(amount), Some(category)) if errors.is_empty() => Ok(ValidInput {
            amount,
            description: description.to_string(),
            category,
        }),
        _ => Err(LedgerError::Validation(errors)),
    }
}

/// Service for expense lifecycle operations
pub struct LedgerService<'a> {
    store: &'a dyn ExpenseStore,
}

impl<'a> LedgerService<'a> {
    pub fn new(store: &'a dyn ExpenseStore) -> Self {
        Self { store }
    }

    /// Validate and persist a new expense for `user_id`
    pub fn create(&self, user_id: UserId, input: ExpenseInput) -> LedgerResult<Expense> {
        let valid = validate(&input)?;
        let expense = Expense::new(
            user_id,
            input.date,
            valid.category,
            valid.amount,
            valid.description,
        );

        let saved = self.store.save(&expense)?;
        if let Some(id) = saved.id {
            info!(expense_id = %id, user_id = %user_id, amount = %saved.amount, "created expense");
        }
        Ok(saved)
    }

    /// Replace the mutable fields of an already stored expense
    ///
    /// The id and owner come from `existing`. Ownership is the caller's
    /// responsibility; see [`LedgerService::update_owned`].
    pub fn update(&self, existing: &Expense, input: ExpenseInput) -> LedgerResult<Expense> {
        let id = existing
            .id
            .ok_or_else(|| LedgerError::expense_not_found("(unsaved)"))?;
        let valid = validate(&input)?;

        let updated = Expense::new(
            existing.user_id,
            input.date,
            valid.category,
            valid.amount,
            valid.description,
        )
        .with_id(id);

        let saved = self.store.save(&updated)?;
        info!(expense_id = %id, user_id = %existing.user_id, "updated expense");
        Ok(saved)
    }

    /// Fetch an expense, requiring that `user_id` owns it
    pub fn find_owned(&self, user_id: UserId, id: ExpenseId) -> LedgerResult<Expense> {
        let expense = self
            .store
            .find(id)?
            .ok_or_else(|| LedgerError::expense_not_found(id))?;

        if !expense.is_owned_by(user_id) {
            return Err(LedgerError::Ownership {
                expense_id: id.value(),
                user_id: user_id.value(),
            });
        }
        Ok(expense)
    }

    pub fn update_owned(
        &self,
        user_id: UserId,
        id: ExpenseId,
        input: ExpenseInput,
    ) -> LedgerResult<Expense> {
        let existing = self.find_owned(user_id, id)?;
        self.update(&existing, input)
    }

    /// Delete an expense owned by `user_id`
    pub fn delete(&self, user_id: UserId, id: ExpenseId) -> LedgerResult<Expense> {
        let expense = self.find_owned(user_id, id)?;
        self.store.delete(id)?;
        info!(expense_id = %id, user_id = %user_id, "deleted expense");
        Ok(expense)
    }

    /// One page of the user's expenses for a month, newest first
    pub fn list(
        &self,
        user_id: UserId,
        year: i32,
        month: u32,
        page: u64,
    ) -> LedgerResult<Page<Expense>> {
        let criteria = ExpenseCriteria::for_month(user_id, year, month);
        let request = PageRequest::new(page);

        let total = self.store.count_by(&criteria)?;
        let items = self
            .store
            .find_by(&criteria, request.offset(), request.limit())?;

        Ok(Page::new(items, request, total))
    }

    pub fn count(&self, user_id: UserId, year: i32, month: u32) -> LedgerResult<u64> {
        self.store
            .count_by(&ExpenseCriteria::for_month(user_id, year, month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PAGE_SIZE;
    use crate::storage::SqliteExpenseStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(amount: f64, description: &str, category: &str) -> ExpenseInput {
        ExpenseInput::new(amount, description, date(2025, 3, 14), category)
    }

    fn create_test_store() -> SqliteExpenseStore {
        SqliteExpenseStore::open_in_memory().unwrap()
    }

    #[test]
    fn test_create_rounds_to_cents() {
        let store = create_test_store();
        let service = LedgerService::new(&store);

        let expense = service
            .create(UserId::new(1), input(12.345, "Lunch", "Groceries"))
            .unwrap();

        assert!(expense.id.is_some());
        assert_eq!(expense.amount.cents(), 1235);
        assert_eq!(expense.category, ExpenseCategory::Groceries);
        assert_eq!(store.find(expense.id.unwrap()).unwrap(), Some(expense));
    }

    #[test]
    fn test_create_trims_text_fields() {
        let store = create_test_store();
        let service = LedgerService::new(&store);

        let expense = service
            .create(UserId::new(1), input(5.0, "  Bus  ", " Transport "))
            .unwrap();
        assert_eq!(expense.description, "Bus");
        assert_eq!(expense.category, ExpenseCategory::Transport);
    }

    #[test]
    fn test_create_reports_every_invalid_field() {
        let store = create_test_store();
        let service = LedgerService::new(&store);

        let err = service
            .create(UserId::new(1), input(0.0, "   ", "Pets"))
            .unwrap_err();

        let errors = err.validation_errors().unwrap();
        assert_eq!(
            errors.fields(),
            vec![
                ExpenseField::Amount,
                ExpenseField::Description,
                ExpenseField::Category
            ]
        );
        assert_eq!(store.count_by(&ExpenseCriteria::new()).unwrap(), 0);
    }

    #[test]
    fn test_create_rejects_negative_and_non_finite_amounts() {
        let store = create_test_store();
        let service = LedgerService::new(&store);

        for amount in [-3.0, f64::NAN, f64::INFINITY, 0.004] {
            let err = service
                .create(UserId::new(1), input(amount, "x", "Other"))
                .unwrap_err();
            assert!(err.validation_errors().unwrap().has(ExpenseField::Amount));
        }
    }

    #[test]
    fn test_create_requires_exact_category_name() {
        let store = create_test_store();
        let service = LedgerService::new(&store);

        let err = service
            .create(UserId::new(1), input(1.0, "x", "groceries"))
            .unwrap_err();
        assert_eq!(err.validation_errors().unwrap().fields(), vec![ExpenseField::Category]);

        let err = service
            .create(UserId::new(1), input(1.0, "x", ""))
            .unwrap_err();
        assert!(err.validation_errors().unwrap().has(ExpenseField::Category));
    }

    #[test]
    fn test_non_numeric_amount_reported_with_other_fields() {
        let store = create_test_store();
        let service = LedgerService::new(&store);

        let err = service
            .create(UserId::new(1), input(f64::NAN, "", "Pets"))
            .unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.iter().next().unwrap().message,
            "Amount must be a number."
        );
    }

    #[test]
    fn test_update_of_unsaved_expense_is_not_found() {
        let store = create_test_store();
        let service = LedgerService::new(&store);
        let unsaved = Expense::new(
            UserId::new(1),
            date(2025, 3, 1),
            ExpenseCategory::Other,
            Money::from_cents(100),
            "Draft",
        );

        let err = service.update(&unsaved, input(1.0, "Draft", "Other")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.count_by(&ExpenseCriteria::new()).unwrap(), 0);
    }

    #[test]
    fn test_update_preserves_id_and_owner() {
        let store = create_test_store();
        let service = LedgerService::new(&store);
        let created = service
            .create(UserId::new(1), input(10.0, "Cinema", "Entertainment"))
            .unwrap();

        let updated = service
            .update(
                &created,
                ExpenseInput::new(12.5, "Cinema + popcorn", date(2025, 3, 15), "Entertainment"),
            )
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.user_id, created.user_id);
        assert_eq!(updated.amount.cents(), 1250);
        assert_eq!(updated.date, date(2025, 3, 15));
        assert_eq!(store.count_by(&ExpenseCriteria::new()).unwrap(), 1);
    }

    #[test]
    fn test_invalid_update_leaves_row_unchanged() {
        let store = create_test_store();
        let service = LedgerService::new(&store);
        let created = service
            .create(UserId::new(1), input(10.0, "Cinema", "Entertainment"))
            .unwrap();

        assert!(service
            .update(&created, input(-1.0, "Cinema", "Entertainment"))
            .unwrap_err()
            .is_validation());
        assert_eq!(store.find(created.id.unwrap()).unwrap(), Some(created));
    }

    #[test]
    fn test_find_owned() {
        let store = create_test_store();
        let service = LedgerService::new(&store);
        let created = service
            .create(UserId::new(1), input(10.0, "Rent", "Housing"))
            .unwrap();
        let id = created.id.unwrap();

        assert_eq!(service.find_owned(UserId::new(1), id).unwrap(), created);
        assert!(service
            .find_owned(UserId::new(2), id)
            .unwrap_err()
            .is_ownership());
        assert!(service
            .find_owned(UserId::new(1), ExpenseId::new(404))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_update_owned_rejects_other_user() {
        let store = create_test_store();
        let service = LedgerService::new(&store);
        let created = service
            .create(UserId::new(1), input(10.0, "Rent", "Housing"))
            .unwrap();

        let err = service
            .update_owned(UserId::new(2), created.id.unwrap(), input(99.0, "Hijack", "Other"))
            .unwrap_err();
        assert!(err.is_ownership());
        assert_eq!(store.find(created.id.unwrap()).unwrap(), Some(created));
    }

    #[test]
    fn test_delete_checks_ownership() {
        let store = create_test_store();
        let service = LedgerService::new(&store);
        let created = service
            .create(UserId::new(1), input(10.0, "Rent", "Housing"))
            .unwrap();
        let id = created.id.unwrap();

        assert!(service.delete(UserId::new(2), id).unwrap_err().is_ownership());
        assert!(store.find(id).unwrap().is_some());

        service.delete(UserId::new(1), id).unwrap();
        assert!(store.find(id).unwrap().is_none());
        assert!(service.delete(UserId::new(1), id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_paginates_by_month() {
        let store = create_test_store();
        let service = LedgerService::new(&store);
        let user = UserId::new(1);

        for day in 1..=23 {
            service
                .create(
                    user,
                    ExpenseInput::new(1.0, format!("Day {}", day), date(2025, 4, day), "Other"),
                )
                .unwrap();
        }
        service
            .create(user, ExpenseInput::new(1.0, "May", date(2025, 5, 1), "Other"))
            .unwrap();
        service
            .create(
                UserId::new(2),
                ExpenseInput::new(1.0, "Not mine", date(2025, 4, 2), "Other"),
            )
            .unwrap();

        let first = service.list(user, 2025, 4, 1).unwrap();
        assert_eq!(first.items.len() as u64, PAGE_SIZE);
        assert_eq!(first.total, 23);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_more);
        assert_eq!(first.items[0].date, date(2025, 4, 23));

        let last = service.list(user, 2025, 4, 3).unwrap();
        assert_eq!(last.items.len(), 3);
        assert!(!last.has_more);
        assert_eq!(last.items[2].date, date(2025, 4, 1));

        // page 0 behaves like page 1
        assert_eq!(service.list(user, 2025, 4, 0).unwrap(), first);
        assert!(service.list(user, 2025, 4, 9).unwrap().is_empty());
        assert!(service.list(user, 2025, 4, u64::MAX).unwrap().is_empty());
        assert_eq!(service.count(user, 2025, 4).unwrap(), 23);
    }
}
