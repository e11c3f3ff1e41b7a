// src/models/product.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

// ==================== PRODUCT STATUS ====================

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display, AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Available,
    OutOfStock,
    Discontinued,
}

impl Default for ProductStatus {
    fn default() -> Self {
        ProductStatus::Available
    }
}

// ==================== PRODUCT ====================

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub status: ProductStatus,
    pub in_stock: bool,
    pub price: f64,
    /// Дата последнего заказа, поле сортировки по умолчанию.
    pub order_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Поиск по подстроке в имени, артикуле и категории, без учёта регистра.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.sku.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
    }
}
