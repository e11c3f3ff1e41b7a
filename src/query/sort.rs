// src/query/sort.rs
//! Сортировка списков: направление, белый список полей, переключение по клику.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Поле сортировки по умолчанию для списка товаров.
pub const DEFAULT_SORT_FIELD: &str = "orderDate";

// ==================== SORT DIRECTION ====================

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

impl Default for SortDir {
    fn default() -> Self {
        SortDir::Asc
    }
}

impl SortDir {
    pub fn toggle(&self) -> SortDir {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }

    /// "desc" в любом регистре даёт Desc, всё остальное — Asc.
    pub fn validate(raw: &str) -> SortDir {
        match raw.to_lowercase().as_str() {
            "desc" => SortDir::Desc,
            _ => SortDir::Asc,
        }
    }
}

// ==================== SORT FIELD WHITELIST ====================

pub struct ProductSortWhitelist;

impl ProductSortWhitelist {
    /// Whitelist разрешённых полей сортировки (ключи как на проводе).
    const ALLOWED: &'static [&'static str] = &[
        "orderDate",
        "name",
        "category",
        "price",
        "status",
        "createdAt",
    ];

    pub fn validate(field: &str) -> &'static str {
        match Self::ALLOWED.iter().find(|allowed| **allowed == field) {
            Some(allowed) => allowed,
            None => {
                log::warn!(
                    "⚠️ Unknown sort field '{}', falling back to '{}'",
                    field,
                    DEFAULT_SORT_FIELD
                );
                DEFAULT_SORT_FIELD
            }
        }
    }

    pub fn is_allowed(field: &str) -> bool {
        Self::ALLOWED.contains(&field)
    }
}

// ==================== SORT SPEC ====================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub sort_by: String,
    pub sort_dir: SortDir,
}

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec {
            sort_by: DEFAULT_SORT_FIELD.to_string(),
            sort_dir: SortDir::Asc,
        }
    }
}

impl SortSpec {
    pub fn new(field: &str, dir: SortDir) -> Self {
        SortSpec {
            sort_by: ProductSortWhitelist::validate(field).to_string(),
            sort_dir: dir,
        }
    }

    /// Клик по заголовку колонки: то же поле — переворот направления,
    /// новое поле — сортировка по нему по возрастанию.
    pub fn toggle_field(&mut self, field: &str) {
        let field = ProductSortWhitelist::validate(field);
        if self.sort_by == field {
            self.sort_dir = self.sort_dir.toggle();
        } else {
            self.sort_by = field.to_string();
            self.sort_dir = SortDir::Asc;
        }
    }
}

// ==================== TESTS ====================
