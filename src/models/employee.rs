// src/models/employee.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use validator::Validate;

use crate::validation::{normalize_phone, PHONE_LOCAL_LENGTH, SAUDI_COUNTRY_PREFIX};

// ==================== EMPLOYEE ROLE ====================

/// Роли передаются по проводу как есть: "Driver", "Manager".
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display, AsRefStr,
)]
pub enum EmployeeRole {
    Driver,
    Manager,
}

impl Default for EmployeeRole {
    fn default() -> Self {
        EmployeeRole::Driver
    }
}

// ==================== EMPLOYEE ====================

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Полный номер, уже с кодом страны.
    pub phone_number: String,
    pub role: EmployeeRole,
    pub created_at: DateTime<Utc>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Новая запись из формы. Телефон берётся как есть: к этому моменту
    /// он уже дополнен кодом страны.
    pub fn from_request(request: &CreateEmployeeRequest) -> Self {
        Employee {
            id: uuid::Uuid::new_v4().to_string(),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            phone_number: request.phone_number.clone(),
            role: request.role,
            created_at: Utc::now(),
        }
    }
}

// === REQUESTS ===

/// Форма создания сотрудника. Телефон вводится локальным номером;
/// код страны допускается и отрезается перед проверкой длины.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,

    pub role: EmployeeRole,
}

// === VALIDATORS ===

fn validate_phone_number(value: &str) -> Result<(), validator::ValidationError> {
    let national = normalize_phone(value, SAUDI_COUNTRY_PREFIX);
    if national.is_empty() {
        let mut error = validator::ValidationError::new("phone_required");
        error.message = Some("Phone number is required".into());
        return Err(error);
    }
    if national.chars().count() != PHONE_LOCAL_LENGTH {
        let mut error = validator::ValidationError::new("phone_length");
        error.message = Some(
            format!(
                "Phone number must be exactly {} characters after the country code",
                PHONE_LOCAL_LENGTH
            )
            .into(),
        );
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_pascal_case() {
        use std::str::FromStr;
        assert_eq!(EmployeeRole::from_str("Driver").unwrap(), EmployeeRole::Driver);
        assert_eq!(
            serde_json::to_string(&EmployeeRole::Manager).unwrap(),
            "\"Manager\""
        );
        assert!(EmployeeRole::from_str("driver").is_err());
    }

    #[test]
    fn test_full_name_joins_with_space() {
        let e = Employee {
            id: "e-1".to_string(),
            first_name: "Omar".to_string(),
            last_name: "Hassan".to_string(),
            phone_number: "+966501234567".to_string(),
            role: EmployeeRole::Driver,
            created_at: Utc::now(),
        };
        assert_eq!(e.full_name(), "Omar Hassan");
    }

    #[test]
    fn test_from_request_assigns_id_and_timestamp() {
        let req = CreateEmployeeRequest {
            first_name: "Omar".to_string(),
            last_name: "Hassan".to_string(),
            phone_number: "+966501234567".to_string(),
            role: EmployeeRole::Manager,
        };
        let employee = Employee::from_request(&req);

        assert!(!employee.id.is_empty());
        assert_eq!(employee.phone_number, "+966501234567");
        assert_eq!(employee.role, EmployeeRole::Manager);

        // Каждый вызов даёт новый идентификатор.
        assert_ne!(employee.id, Employee::from_request(&req).id);
    }

    #[test]
    fn test_valid_request_passes_derive_checks() {
        let req = CreateEmployeeRequest {
            first_name: "Omar".to_string(),
            last_name: "Hassan".to_string(),
            phone_number: "501234567".to_string(),
            role: EmployeeRole::Driver,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_phone_accepts_country_prefix() {
        let req = CreateEmployeeRequest {
            first_name: "Omar".to_string(),
            last_name: "Hassan".to_string(),
            phone_number: "+966501234567".to_string(),
            role: EmployeeRole::Manager,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_phone_wrong_length_rejected() {
        let req = CreateEmployeeRequest {
            first_name: "Omar".to_string(),
            last_name: "Hassan".to_string(),
            phone_number: "12345".to_string(),
            role: EmployeeRole::Driver,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone_number"));
    }

    #[test]
    fn test_empty_names_rejected() {
        let req = CreateEmployeeRequest {
            first_name: "".to_string(),
            last_name: "".to_string(),
            phone_number: "501234567".to_string(),
            role: EmployeeRole::Driver,
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("last_name"));
    }

    #[test]
    fn test_request_json_shape() {
        let req = CreateEmployeeRequest {
            first_name: "Omar".to_string(),
            last_name: "Hassan".to_string(),
            phone_number: "+966501234567".to_string(),
            role: EmployeeRole::Driver,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["firstName"], "Omar");
        assert_eq!(json["phoneNumber"], "+966501234567");
        assert_eq!(json["role"], "Driver");
    }
}
