// src/employee_form.rs
//! Сценарий создания сотрудника: локализованная валидация формы,
//! префикс кода страны перед отправкой, тост и редирект по результату.
//!
//! При ошибке каталога пользователь остаётся на форме. Уходить с неё
//! разрешено только после успешного создания.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde::Serialize;
use validator::Validate;

use crate::config::{Config, PhoneConfig};
use crate::error::{AppError, AppResult};
use crate::i18n::{translate, translate_with, Lang};
use crate::models::{CreateEmployeeRequest, Employee};
use crate::paths;
use crate::snackbar::Notifier;
use crate::validation::{normalize_phone, CustomValidate, FieldValidator, ValidationResult};

// ==================== DIRECTORY ====================

/// Каталог сотрудников на стороне бэкенда. Форма знает только
/// эту операцию.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    async fn create_user(&self, request: &CreateEmployeeRequest) -> AppResult<Employee>;
}

// ==================== LOCALIZED VALIDATION ====================

/// Проверяет форму и возвращает сообщения на языке пользователя.
/// Телефон сверяется с локальной длиной уже без кода страны.
pub fn validate_localized(
    request: &CreateEmployeeRequest,
    lang: Lang,
    phone: &PhoneConfig,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    if request.first_name.trim().is_empty() {
        result.add_error("firstName", &translate(lang, "firstNameRequired"));
    }
    if request.last_name.trim().is_empty() {
        result.add_error("lastName", &translate(lang, "lastNameRequired"));
    }

    let national = normalize_phone(&request.phone_number, &phone.country_code);
    if national.is_empty() {
        result.add_error("phoneNumber", &translate(lang, "phoneNumberRequired"));
    } else {
        let expected = phone.national_length.to_string();
        let actual = national.chars().count();
        if actual < phone.national_length {
            result.add_error(
                "phoneNumber",
                &translate_with(lang, "phoneNumberMinLength", &[("minLength", &expected)]),
            );
        } else if actual > phone.national_length {
            result.add_error(
                "phoneNumber",
                &translate_with(lang, "phoneNumberMaxLength", &[("maxLength", &expected)]),
            );
        }
        // Нецифровые символы не блокируют отправку.
        if let Err(warning) = FieldValidator::validate_digits(&national, "phoneNumber") {
            result.add_warning("phoneNumber", &warning);
        }
    }

    result
}

// ==================== FORM ====================

/// Итог успешной отправки: созданная запись и адрес, куда уводим
/// пользователя.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub employee: Employee,
    pub redirect: String,
}

pub struct EmployeeForm {
    directory: Arc<dyn EmployeeDirectory>,
    notifier: Arc<dyn Notifier>,
    lang: Lang,
    phone: PhoneConfig,
}

impl EmployeeForm {
    pub fn new(
        directory: Arc<dyn EmployeeDirectory>,
        notifier: Arc<dyn Notifier>,
        config: &Config,
    ) -> Self {
        EmployeeForm {
            directory,
            notifier,
            lang: config.locale.lang,
            phone: config.phone.clone(),
        }
    }

    /// Отправка формы.
    ///
    /// Невалидная форма возвращает ошибку сразу: без тоста и без
    /// обращения к каталогу. Валидный телефон дополняется кодом страны
    /// непосредственно перед вызовом `create_user`.
    pub async fn submit(&self, request: CreateEmployeeRequest) -> AppResult<SubmitOutcome> {
        let checked = validate_localized(&request, self.lang, &self.phone);
        if !checked.is_valid {
            log::warn!(
                "⚠️ Employee form rejected with {} validation error(s)",
                checked.error_count()
            );
            return Err(checked.to_app_error());
        }
        for messages in checked.warnings.values() {
            for warning in messages {
                log::warn!("⚠️ Employee form warning: {}", warning);
            }
        }

        let mut request = request;
        request.phone_number = self.full_phone(&request.phone_number);

        match self.directory.create_user(&request).await {
            Ok(employee) => {
                let signature = format!("# {}", employee.full_name());
                let message =
                    translate(self.lang, "employeeCreatedSuccess").replace('@', &signature);
                self.notifier.success(&message);
                log::info!("✅ Employee created: {}", employee.id);

                Ok(SubmitOutcome {
                    redirect: paths::dashboard::employees::root(),
                    employee,
                })
            }
            Err(err) => {
                log::error!("❌ Failed to create employee: {}", err);
                self.notifier
                    .error(&translate(self.lang, "somethingWentWrong"));
                Err(err)
            }
        }
    }

    /// Полный номер для провода. Повторный код страны не дублируется.
    fn full_phone(&self, raw: &str) -> String {
        format!(
            "{}{}",
            self.phone.country_code,
            normalize_phone(raw, &self.phone.country_code)
        )
    }
}

// ==================== IN-MEMORY DIRECTORY ====================

/// Каталог в памяти для тестов и работы без бэкенда. Телефон —
/// естественный ключ, повторное создание отклоняется.
pub struct MemoryEmployeeDirectory {
    employees: Mutex<Vec<Employee>>,
}

impl MemoryEmployeeDirectory {
    pub fn new() -> Self {
        MemoryEmployeeDirectory {
            employees: Mutex::new(Vec::new()),
        }
    }

    pub fn employees(&self) -> Vec<Employee> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Employee>> {
        self.employees
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryEmployeeDirectory {
    fn default() -> Self {
        MemoryEmployeeDirectory::new()
    }
}

#[async_trait]
impl EmployeeDirectory for MemoryEmployeeDirectory {
    async fn create_user(&self, request: &CreateEmployeeRequest) -> AppResult<Employee> {
        // Валидация: derive-проверки, затем доменные
        request.validate()?;
        let custom = request.custom_validate();
        if !custom.is_valid {
            return Err(custom.to_app_error());
        }

        let mut employees = self.lock();
        if employees
            .iter()
            .any(|existing| existing.phone_number == request.phone_number)
        {
            return Err(AppError::employee_already_exists(&request.phone_number));
        }

        let employee = Employee::from_request(request);
        employees.push(employee.clone());
        Ok(employee)
    }
}

// ==================== TESTS ====================
