//! Pagination for the user directory and the home timeline

use serde::Deserialize;

/// Maximum items per page
pub const MAX_PER_PAGE: u32 = 100;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page (max 100)
    pub per_page: u32,
}

impl Pagination {
    /// Create pagination with validation.
    ///
    /// - Page is clamped to minimum of 1
    /// - Per page is clamped to 1..=100
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Calculate SQL OFFSET value.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.per_page as u64
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> u32 {
        self.per_page
    }
}

/// Paginated result wrapper
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    /// Items for current page
    pub items: Vec<T>,
    /// Total count across all pages
    pub total: i64,
    /// Current page number
    pub page: u32,
    /// Items per page
    pub per_page: u32,
}

impl<T> Paginated<T> {
    /// Calculate total number of pages.
    pub fn total_pages(&self) -> u32 {
        if self.total <= 0 {
            1
        } else {
            let per_page = self.per_page.max(1) as i64;
            ((self.total + per_page - 1) / per_page).max(1) as u32
        }
    }

    /// Check if there's a next page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Check if there's a previous page.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// `?page=N` query string. Page sizes are fixed per route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u32>,
}

impl PaginationParams {
    pub fn with_per_page(&self, per_page: u32) -> Pagination {
        Pagination::new(self.page.unwrap_or(1), per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(total: i64, page: u32, per_page: u32) -> Paginated<()> {
        Paginated {
            items: vec![],
            total,
            page,
            per_page,
        }
    }

    #[test]
    fn offset_calculation() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(2, 10).offset(), 10);
        assert_eq!(Pagination::new(3, 25).offset(), 50);
    }

    #[test]
    fn clamps_page_and_per_page() {
        assert_eq!(Pagination::new(0, 10).page, 1);
        assert_eq!(Pagination::new(1, 0).per_page, 1);
        assert_eq!(Pagination::new(1, 999).per_page, MAX_PER_PAGE);
    }

    #[test]
    fn missing_page_means_first() {
        let params = PaginationParams::default();
        assert_eq!(params.with_per_page(100), Pagination::new(1, 100));

        let params = PaginationParams { page: Some(3) };
        assert_eq!(params.with_per_page(24), Pagination::new(3, 24));
    }

    #[test]
    fn last_possible_page_does_not_overflow() {
        let page = Pagination::new(u32::MAX, MAX_PER_PAGE);
        assert_eq!(page.offset(), (u32::MAX as u64 - 1) * MAX_PER_PAGE as u64);

        let paged = page_of(5, u32::MAX, 10);
        assert!(!paged.has_next());
        assert!(paged.has_prev());
    }

    #[test]
    fn total_pages() {
        assert_eq!(page_of(0, 1, 10).total_pages(), 1);
        assert_eq!(page_of(25, 1, 10).total_pages(), 3);
        assert_eq!(page_of(100, 1, 10).total_pages(), 10);
    }

    #[test]
    fn has_next_prev() {
        let first = page_of(30, 1, 10);
        assert!(first.has_next());
        assert!(!first.has_prev());

        let middle = page_of(30, 2, 10);
        assert!(middle.has_next());
        assert!(middle.has_prev());

        let last = page_of(30, 3, 10);
        assert!(!last.has_next());
        assert!(last.has_prev());
    }
}
