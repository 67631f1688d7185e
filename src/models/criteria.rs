//! Query criteria for expense listings and aggregates
//!
//! Every field is optional; an absent field means no filter on that
//! dimension. `year` and `month` match components of the expense date.

use super::ids::UserId;

/// Filter applied uniformly by every store query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpenseCriteria {
    pub user_id: Option<UserId>,
    pub year: Option<i32>,
    /// Calendar month, 1-12
    pub month: Option<u32>,
}

impl ExpenseCriteria {
    /// Create a criteria that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Criteria for one user's expenses in a given month
    pub fn for_month(user_id: UserId, year: i32, month: u32) -> Self {
        Self::new().user(user_id).year(year).month(month)
    }

    pub fn user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn is_unfiltered(&self) -> bool {
        self.user_id.is_none() && self.year.is_none() && self.month.is_none()
    }
}
