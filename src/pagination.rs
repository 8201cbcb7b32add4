//! Page of results returned by the player listing.

use serde::Serialize;

/// One bounded slice of a server-side result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    /// Items on this page, in server order
    pub items: Vec<T>,

    /// Total number of matching items across all pages
    pub total_count: u64,

    /// Zero-based page index
    pub page: u32,

    /// Requested page size
    pub page_size: u32,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, total_count: u64, page: u32, page_size: u32) -> Self {
        Self {
            items,
            total_count,
            page,
            page_size,
        }
    }

    /// Number of pages needed to show every item.
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(u64::from(self.page_size))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) + 1 < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    /// Range of 1-based item positions shown on this page, for "11-20 of 25" style labels.
    pub fn item_range(&self) -> Option<(u64, u64)> {
        if self.items.is_empty() {
            return None;
        }
        let start = u64::from(self.page) * u64::from(self.page_size) + 1;
        Some((start, start + self.items.len() as u64 - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let page = PageResult::new(vec![1, 2, 3, 4, 5], 25, 2, 10);
        assert_eq!(page.total_pages(), 3);
        assert!(!page.has_next());
        assert!(page.has_prev());
    }

    #[test]
    fn test_exact_multiple() {
        let page = PageResult::new(vec![0; 10], 20, 0, 10);
        assert_eq!(page.total_pages(), 2);
        assert!(page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn test_empty() {
        let page: PageResult<i32> = PageResult::new(Vec::new(), 0, 0, 10);
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next());
        assert_eq!(page.item_range(), None);
    }

    #[test]
    fn test_item_range() {
        let page = PageResult::new(vec![0; 5], 25, 2, 10);
        assert_eq!(page.item_range(), Some((21, 25)));
    }
}
