// src/query/pagination.rs
//! Пагинация списков: состояние страницы и ответный конверт.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

// ==================== PAGE STATE ====================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageState {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageState {
    fn default() -> Self {
        PageState {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageState {
    pub fn new(page: i64, limit: i64) -> Self {
        PageState {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    pub fn set_page(&mut self, page: i64) {
        self.page = page.max(1);
    }

    /// Смена размера страницы не сбрасывает номер страницы.
    pub fn set_limit(&mut self, limit: i64) {
        self.limit = limit.clamp(1, MAX_LIMIT);
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn prev_page(&mut self) {
        self.page = (self.page - 1).max(1);
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

// ==================== RESPONSE ENVELOPE ====================

/// Конверт ответа списка: страница записей плюс общее количество.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub paginated_list: Vec<T>,
    pub total_count: i64,
}

impl<T> Paginated<T> {
    pub fn new(paginated_list: Vec<T>, total_count: i64) -> Self {
        Paginated {
            paginated_list,
            total_count,
        }
    }

    pub fn empty() -> Self {
        Paginated {
            paginated_list: Vec::new(),
            total_count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.paginated_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paginated_list.is_empty()
    }

    pub fn total_pages(&self, limit: i64) -> i64 {
        if limit <= 0 {
            return 0;
        }
        (self.total_count + limit - 1) / limit
    }

    pub fn has_page_after(&self, pages: &PageState) -> bool {
        pages.page < self.total_pages(pages.limit)
    }
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let pages = PageState::default();
        assert_eq!(pages.page, 1);
        assert_eq!(pages.limit, 10);
        assert_eq!(pages.offset(), 0);
    }

    #[test]
    fn test_page_never_below_one() {
        let mut pages = PageState::default();
        pages.set_page(0);
        assert_eq!(pages.page, 1);
        pages.set_page(-5);
        assert_eq!(pages.page, 1);

        pages.prev_page();
        assert_eq!(pages.page, 1);
    }

    #[test]
    fn test_limit_clamped() {
        let mut pages = PageState::default();
        pages.set_limit(500);
        assert_eq!(pages.limit, 100);
        pages.set_limit(0);
        assert_eq!(pages.limit, 1);

        assert_eq!(PageState::new(-1, 1000), PageState { page: 1, limit: 100 });
    }

    #[test]
    fn test_limit_change_keeps_page() {
        let mut pages = PageState::new(4, 10);
        pages.set_limit(25);
        assert_eq!(pages.page, 4);
        assert_eq!(pages.limit, 25);
    }

    #[test]
    fn test_offset() {
        let pages = PageState::new(3, 10);
        assert_eq!(pages.offset(), 20);
    }

    #[test]
    fn test_envelope_total_pages() {
        let page: Paginated<i32> = Paginated::new(vec![1, 2, 3], 23);
        assert_eq!(page.total_pages(10), 3);
        assert_eq!(page.total_pages(23), 1);
        assert_eq!(page.total_pages(0), 0);
    }

    #[test]
    fn test_envelope_has_page_after() {
        let page: Paginated<i32> = Paginated::new(vec![1, 2], 23);
        assert!(page.has_page_after(&PageState::new(2, 10)));
        assert!(!page.has_page_after(&PageState::new(3, 10)));
    }

    #[test]
    fn test_envelope_wire_shape() {
        let page = Paginated::new(vec!["a", "b"], 2);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["paginatedList"], serde_json::json!(["a", "b"]));
        assert_eq!(json["totalCount"], 2);
    }

    #[test]
    fn test_empty_envelope() {
        let page: Paginated<String> = Paginated::empty();
        assert!(page.is_empty());
        assert_eq!(page.len(), 0);
        assert_eq!(page.total_count, 0);
    }
}
