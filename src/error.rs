// src/error.rs
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    ValidationError(String),
    FetchError(String),
    ParseError(String),
    ConfigError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::FetchError(msg) => write!(f, "Fetch Error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse Error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

// Специфичные ошибки для дашборда
impl AppError {
    pub fn resource_not_found(resource: &str, id: &str) -> Self {
        AppError::NotFound(format!("{} with ID '{}' not found", resource, id))
    }

    pub fn employee_already_exists(phone: &str) -> Self {
        AppError::BadRequest(format!("Employee with phone '{}' already exists", phone))
    }

    pub fn validation_failed(field: &str) -> Self {
        AppError::ValidationError(format!("Validation failed for field: {}", field))
    }

    pub fn fetch_failed(resource: &str, reason: &str) -> Self {
        AppError::FetchError(format!("Failed to fetch {}: {}", resource, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::ValidationError("phoneNumber is invalid".to_string());
        assert_eq!(err.to_string(), "Validation Error: phoneNumber is invalid");

        let err = AppError::resource_not_found("Product", "abc-123");
        assert_eq!(err.to_string(), "Not Found: Product with ID 'abc-123' not found");
    }

    #[test]
    fn test_fetch_failed_helper() {
        let err = AppError::fetch_failed("products", "connection refused");
        assert!(matches!(err, AppError::FetchError(_)));
        assert!(err.to_string().contains("products"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_from_serde_json() {
        let bad: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: AppError = bad.unwrap_err().into();
        assert!(matches!(err, AppError::ParseError(_)));
    }
}
