// src/lib.rs
//! Ядро админ-дашборда: статусы заявок на обслуживание, дескрипторы
//! списочных запросов и сценарий создания сотрудника.
//!
//! Crate держит только логику. Рендеринг, HTTP и хранение остаются за
//! хост-приложением: оно подключается через контракты `ListSource`,
//! `EmployeeDirectory` и `Notifier`.

// Module declarations
pub mod config;
pub mod debounce;
pub mod employee_form;
pub mod error;
pub mod i18n;
pub mod models;
pub mod paths;
pub mod query;
pub mod snackbar;
pub mod sources;
pub mod validation;

// Re-exports
pub use config::{load_config, Config};
pub use employee_form::{EmployeeDirectory, EmployeeForm, SubmitOutcome};
pub use error::{AppError, AppResult};
pub use models::{calc_percentage_from_units, status_colors};
pub use query::{ListQuery, ListQueryComposer, Paginated};
pub use snackbar::{Notifier, Toast};
pub use sources::{ListSession, ListSource, ListState};
