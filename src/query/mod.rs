// src/query/mod.rs
//! Параметры списочных экранов: поиск, фильтры, сортировка и пагинация,
//! собранные в один неизменяемый дескриптор запроса.

// 1. Объявляем модули
pub mod composer;
pub mod filters;
pub mod pagination;
pub mod sort;

// 2. Ре-экспортируем содержимое
pub use composer::*;
pub use filters::*;
pub use pagination::*;
pub use sort::*;

use serde::{Deserialize, Serialize};
use urlencoding::encode;

// ==================== LIST QUERY ====================

/// Снимок параметров запроса. Каждое изменение состояния даёт новый
/// снимок, старые никто не мутирует.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
    pub filters: ProductFilters,
    pub sort_by: String,
    pub sort_dir: SortDir,
    pub page: i64,
    pub limit: i64,
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery {
            search_text: None,
            filters: ProductFilters::default(),
            sort_by: DEFAULT_SORT_FIELD.to_string(),
            sort_dir: SortDir::Asc,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListQuery {
    /// Сериализует дескриптор в строку запроса. Повторяющиеся ключи
    /// (category, status) кодируются повторением пары.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<String> = vec![
            format!("page={}", self.page),
            format!("limit={}", self.limit),
            format!("sortBy={}", encode(&self.sort_by)),
            format!("sortDir={}", self.sort_dir),
        ];

        if let Some(search) = &self.search_text {
            pairs.push(format!("searchText={}", encode(search)));
        }
        if let Some(name) = &self.filters.name {
            pairs.push(format!("name={}", encode(name)));
        }
        for category in &self.filters.category {
            pairs.push(format!("category={}", encode(category)));
        }
        for status in &self.filters.status {
            pairs.push(format!("status={}", encode(status)));
        }
        if let Some(in_stock) = self.filters.in_stock {
            pairs.push(format!("inStock={}", in_stock));
        }
        if let Some(query) = &self.filters.query {
            pairs.push(format!("query={}", encode(query)));
        }

        pairs.join("&")
    }
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_descriptor() {
        let query = ListQuery::default();
        assert_eq!(query.sort_by, "orderDate");
        assert_eq!(query.sort_dir, SortDir::Asc);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert_eq!(query.search_text, None);
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_default_query_string() {
        assert_eq!(
            ListQuery::default().to_query_string(),
            "page=1&limit=10&sortBy=orderDate&sortDir=asc"
        );
    }

    #[test]
    fn test_query_string_encodes_search() {
        let query = ListQuery {
            search_text: Some("mixer grinder".to_string()),
            ..Default::default()
        };
        assert_eq!(
            query.to_query_string(),
            "page=1&limit=10&sortBy=orderDate&sortDir=asc&searchText=mixer%20grinder"
        );
    }

    #[test]
    fn test_query_string_repeats_array_keys() {
        let query = ListQuery {
            filters: ProductFilters {
                category: vec!["Kitchen".to_string(), "Home & Garden".to_string()],
                in_stock: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            query.to_query_string(),
            "page=1&limit=10&sortBy=orderDate&sortDir=asc\
             &category=Kitchen&category=Home%20%26%20Garden&inStock=true"
        );
    }

    #[test]
    fn test_json_shape_is_camel_case() {
        let query = ListQuery {
            search_text: Some("kettle".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["searchText"], "kettle");
        assert_eq!(json["sortBy"], "orderDate");
        assert_eq!(json["sortDir"], "asc");
        assert_eq!(json["filters"], serde_json::json!({}));
    }

    #[test]
    fn test_search_text_omitted_when_none() {
        let json = serde_json::to_value(ListQuery::default()).unwrap();
        assert!(json.get("searchText").is_none());
    }

    #[test]
    fn test_round_trip() {
        let query = ListQuery {
            search_text: Some("kettle".to_string()),
            filters: ProductFilters {
                status: vec!["available".to_string()],
                ..Default::default()
            },
            sort_by: "price".to_string(),
            sort_dir: SortDir::Desc,
            page: 2,
            limit: 25,
        };
        let json = serde_json::to_string(&query).unwrap();
        let back: ListQuery = serde_json::from_str(&json).unwrap();
        assert_eq!(back, query);
    }
}
