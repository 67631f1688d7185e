//! Pagination for expense listings

use serde::Serialize;

/// Fixed number of expenses per page
pub const PAGE_SIZE: u64 = 10;

/// A 1-based page request; page numbers below 1 are clamped to 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
}

impl PageRequest {
    pub fn new(page: u64) -> Self {
        Self { page: page.max(1) }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(PAGE_SIZE)
    }

    pub fn limit(&self) -> u64 {
        PAGE_SIZE
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1)
    }
}

/// One page of results together with the totals needed for navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page(),
            total,
            total_pages: total.div_ceil(PAGE_SIZE),
            has_more: total > request.page().saturating_mul(PAGE_SIZE),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        assert_eq!(PageRequest::new(1).offset(), 0);
        assert_eq!(PageRequest::new(3).offset(), 20);
        assert_eq!(PageRequest::new(0).page(), 1);
    }

    #[test]
    fn test_page_totals() {
        let page: Page<u8> = Page::new(vec![], PageRequest::new(1), 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_more);

        let last: Page<u8> = Page::new(vec![], PageRequest::new(3), 25);
        assert!(!last.has_more);

        let exact: Page<u8> = Page::new(vec![], PageRequest::new(2), 20);
        assert_eq!(exact.total_pages, 2);
        assert!(!exact.has_more);

        let empty: Page<u8> = Page::new(vec![], PageRequest::new(1), 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_more);
    }

    #[test]
    fn test_huge_page_number_saturates() {
        let request = PageRequest::new(u64::MAX);
        assert_eq!(request.offset(), u64::MAX);

        let page: Page<u8> = Page::new(vec![], request, 25);
        assert!(page.is_empty());
        assert!(!page.has_more);
        assert_eq!(page.page, u64::MAX);
    }
}
