// src/validation.rs
//! Модуль валидации данных форм.
//!
//! Ошибки блокируют отправку, предупреждения — нет. Телефоны
//! нормализуются к локальному виду (без кода страны) до проверок.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::AppError;
use crate::models::CreateEmployeeRequest;

lazy_static! {
    static ref DIGITS_REGEX: Regex = Regex::new(r"^\d+$").unwrap();
}

/// Код страны по умолчанию; пользователи часто вводят его вручную.
pub const SAUDI_COUNTRY_PREFIX: &str = "+966";

/// Длина локального номера после отрезания кода страны.
pub const PHONE_LOCAL_LENGTH: usize = 9;

/// Убирает пробелы по краям и ведущий код страны, если он есть.
/// Код страны отрезается не больше одного раза.
pub fn normalize_phone(raw: &str, country_code: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix(country_code)
        .unwrap_or(trimmed)
        .to_string()
}

// ==================== VALIDATION RESULT ====================

#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: HashMap<String, Vec<String>>,
    pub warnings: HashMap<String, Vec<String>>,
}

impl ValidationResult {
    pub fn new() -> Self {
        ValidationResult {
            is_valid: true,
            errors: HashMap::new(),
            warnings: HashMap::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.is_valid = self.is_valid && other.is_valid;
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        for (field, messages) in other.warnings {
            self.warnings.entry(field).or_default().extend(messages);
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.values().map(|v| v.len()).sum()
    }

    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors.get(field).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Сворачивает ошибки в одну `AppError` для возврата из операции.
    pub fn to_app_error(&self) -> AppError {
        let message = self
            .errors
            .iter()
            .map(|(field, errors)| format!("{}: {}", field, errors.join(", ")))
            .collect::<Vec<_>>()
            .join("; ");

        AppError::ValidationError(message)
    }
}

// ==================== FIELD VALIDATOR ====================

pub struct FieldValidator;

impl FieldValidator {
    pub fn validate_required(value: &str, field: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            return Err(format!("{} is required", field));
        }
        Ok(())
    }

    pub fn validate_exact_length(value: &str, field: &str, expected: usize) -> Result<(), String> {
        let actual = value.chars().count();
        if actual != expected {
            return Err(format!(
                "{} must be exactly {} characters, got {}",
                field, expected, actual
            ));
        }
        Ok(())
    }

    pub fn validate_max_length(value: &str, field: &str, max: usize) -> Result<(), String> {
        if value.chars().count() > max {
            return Err(format!("{} must not exceed {} characters", field, max));
        }
        Ok(())
    }

    pub fn validate_digits(value: &str, field: &str) -> Result<(), String> {
        if !DIGITS_REGEX.is_match(value) {
            return Err(format!("{} must contain digits only", field));
        }
        Ok(())
    }
}

// ==================== CUSTOM VALIDATION TRAIT ====================

/// Доменная валидация поверх derive-проверок `validator`.
pub trait CustomValidate {
    fn custom_validate(&self) -> ValidationResult;
}

impl CustomValidate for CreateEmployeeRequest {
    fn custom_validate(&self) -> ValidationResult {
        let mut result = ValidationResult::new();

        // length(min = 1) пропускает имена из одних пробелов
        if let Err(e) = FieldValidator::validate_required(&self.first_name, "firstName") {
            result.add_error("firstName", &e);
        }
        if let Err(e) = FieldValidator::validate_required(&self.last_name, "lastName") {
            result.add_error("lastName", &e);
        }

        let national = normalize_phone(&self.phone_number, SAUDI_COUNTRY_PREFIX);
        if let Err(e) = FieldValidator::validate_digits(&national, "phoneNumber") {
            result.add_warning("phoneNumber", &e);
        }

        result
    }
}
