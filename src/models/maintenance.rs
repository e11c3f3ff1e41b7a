// src/models/maintenance.rs
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumString};

// ==================== REQUEST STATUS ====================

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Declined,
    Accepted,
}

impl Default for RequestStatus {
    fn default() -> Self {
        RequestStatus::Pending
    }
}

// ==================== STATUS STYLE ====================

/// Пара цветов для бейджа статуса. Значения — как в макете,
/// вплоть до регистра hex-цифр.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusStyle {
    pub color: &'static str,
    pub background_color: &'static str,
}

/// Стиль для строки, которую не удалось распознать как статус.
/// Фон отличается от фона `pending` (FFB200 против ffb300).
pub const FALLBACK_STYLE: StatusStyle = StatusStyle {
    color: "#161616",
    background_color: "#FFB200dc",
};

impl RequestStatus {
    pub fn style(&self) -> StatusStyle {
        match self {
            RequestStatus::Pending => StatusStyle {
                color: "#161616",
                background_color: "#ffb300dc",
            },
            RequestStatus::Declined => StatusStyle {
                color: "#fff",
                background_color: "#FF2929dc",
            },
            RequestStatus::Accepted => StatusStyle {
                color: "#fff",
                background_color: "#117554dc",
            },
        }
    }
}

/// Возвращает пару цветов бейджа для сырой строки статуса.
/// Сравнение регистрозависимое, всё незнакомое получает запасной стиль.
pub fn status_colors(status: &str) -> StatusStyle {
    match RequestStatus::from_str(status) {
        Ok(parsed) => parsed.style(),
        Err(_) => FALLBACK_STYLE,
    }
}

// ==================== PROGRESS ====================

/// Процент выполнения: `current / total * 100`, две цифры после точки.
/// Деление на ноль и прочие нечисловые исходы дают "0.00".
pub fn calc_percentage_from_units(total_units: f64, current_units: f64) -> String {
    let percent = current_units / total_units * 100.0;
    if !percent.is_finite() {
        return "0.00".to_string();
    }
    format!("{:.2}", percent)
}

// ==================== UNITS QUANTITY ====================

/// Пара «всего/выполнено». API отдаёт числа то числом, то строкой,
/// поэтому оба поля принимают и то и другое.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UnitsQuantity {
    #[serde(deserialize_with = "f64_from_number_or_string")]
    pub total_units: f64,
    #[serde(deserialize_with = "f64_from_number_or_string")]
    pub current_units: f64,
}

impl UnitsQuantity {
    pub fn new(total_units: f64, current_units: f64) -> Self {
        UnitsQuantity {
            total_units,
            current_units,
        }
    }

    pub fn percentage(&self) -> String {
        calc_percentage_from_units(self.total_units, self.current_units)
    }
}

fn f64_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(raw) => raw.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

// ==================== MAINTENANCE REQUEST ====================

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    pub id: String,
    pub title: String,
    pub status: RequestStatus,
    #[serde(flatten)]
    pub units: UnitsQuantity,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceRequest {
    pub fn progress_percent(&self) -> String {
        self.units.percentage()
    }

    pub fn badge_style(&self) -> StatusStyle {
        self.status.style()
    }
}
