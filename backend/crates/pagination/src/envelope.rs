//! Page response envelope.

use serde::{Deserialize, Serialize};

use crate::PageRequest;

/// One page of results plus the counts a client needs to navigate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, in store order.
    pub items: Vec<T>,
    /// One-based page number that was requested.
    pub page: u32,
    /// `ceil(total / limit)`; zero when nothing matched.
    pub total_pages: u64,
    /// Number of matching items across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    /// Assemble a page from already-fetched items and an independent count.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page(),
            total_pages: total_pages(total, request.limit()),
            total,
        }
    }

    /// Convert the items while keeping the counts.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            total: self.total,
        }
    }
}

/// Number of pages needed to show `total` items `limit` at a time.
///
/// ```
/// assert_eq!(pagination::total_pages(45, 20), 3);
/// assert_eq!(pagination::total_pages(0, 20), 0);
/// ```
#[must_use]
pub const fn total_pages(total: u64, limit: u32) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit as u64)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(0, 20, 0)]
    #[case(1, 20, 1)]
    #[case(20, 20, 1)]
    #[case(21, 20, 2)]
    #[case(45, 20, 3)]
    #[case(100, 100, 1)]
    fn total_pages_rounds_up(#[case] total: u64, #[case] limit: u32, #[case] expected: u64) {
        assert_eq!(total_pages(total, limit), expected);
    }

    #[rstest]
    fn serialises_with_camel_case_keys() {
        let page = Page::new(vec![1, 2], PageRequest::new(2, 2), 5);
        let value = serde_json::to_value(&page).expect("page serialises");
        assert_eq!(
            value,
            json!({ "items": [1, 2], "page": 2, "totalPages": 3, "total": 5 })
        );
    }

    #[rstest]
    fn page_past_the_end_is_empty_but_counted() {
        let page: Page<u8> = Page::new(Vec::new(), PageRequest::new(9, 20), 45);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 9);
        assert_eq!(page.total_pages, 3);
    }

    #[rstest]
    fn map_preserves_counts() {
        let page = Page::new(vec![1, 2, 3], PageRequest::new(1, 3), 7).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20, 30]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total, 7);
    }
}
