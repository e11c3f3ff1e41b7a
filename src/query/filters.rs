// src/query/filters.rs
//! Фильтры списка товаров. Панель фильтров отдаёт новый набор целиком,
//! по одному полю ничего не меняется.

use serde::{Deserialize, Serialize};

use crate::models::Product;

// ==================== PRODUCT FILTERS ====================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilters {
    /// Подстрока в названии товара.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Пустой список — категория не ограничена.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    /// Широкий текстовый фильтр (имя и категория).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl ProductFilters {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_empty()
            && self.status.is_empty()
            && self.in_stock.is_none()
            && self.query.is_none()
    }

    /// Сколько критериев сейчас активно (для счётчика на кнопке фильтров).
    pub fn active_count(&self) -> usize {
        let mut count = 0;
        if self.name.is_some() {
            count += 1;
        }
        if !self.category.is_empty() {
            count += 1;
        }
        if !self.status.is_empty() {
            count += 1;
        }
        if self.in_stock.is_some() {
            count += 1;
        }
        if self.query.is_some() {
            count += 1;
        }
        count
    }

    /// Проходит ли товар через все активные критерии.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(name) = &self.name {
            if !product.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if !self.category.is_empty() && !self.category.iter().any(|c| c == &product.category) {
            return false;
        }
        if !self.status.is_empty() && !self.status.iter().any(|s| s == product.status.as_ref()) {
            return false;
        }
        if let Some(in_stock) = self.in_stock {
            if product.in_stock != in_stock {
                return false;
            }
        }
        if let Some(query) = &self.query {
            if !product.matches_search(query) {
                return false;
            }
        }
        true
    }
}

// ==================== TESTS ====================
