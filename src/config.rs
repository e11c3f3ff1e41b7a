// src/config.rs - Configuration management
//! Конфигурация ядра дашборда: дефолты → TOML-файл (`CONFIG_FILE`) →
//! переменные окружения. Секции независимы, частичный файл допустим.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::i18n::Lang;
use crate::query::{DEFAULT_LIMIT, DEFAULT_SORT_FIELD, MAX_LIMIT};
use crate::snackbar::SnackbarOptions;
use crate::validation::{PHONE_LOCAL_LENGTH, SAUDI_COUNTRY_PREFIX};

/// Окно тишины поискового ввода по умолчанию, миллисекунды.
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub query: QueryConfig,
    pub locale: LocaleConfig,
    pub phone: PhoneConfig,
    pub snackbar: SnackbarOptions,
}

/// Параметры списочных экранов: дебаунс поиска и дефолты запроса.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct QueryConfig {
    pub debounce_ms: u64,
    pub default_limit: i64,
    pub default_sort_field: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct LocaleConfig {
    pub lang: Lang,
}

/// Телефонный формат: код страны и длина локального номера.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PhoneConfig {
    pub country_code: String,
    pub national_length: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            default_limit: DEFAULT_LIMIT,
            default_sort_field: DEFAULT_SORT_FIELD.to_string(),
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self { lang: Lang::En }
    }
}

impl LocaleConfig {
    /// Арабский рисуется справа налево.
    pub fn is_rtl(&self) -> bool {
        self.lang == Lang::Ar
    }
}

impl Default for PhoneConfig {
    fn default() -> Self {
        Self {
            country_code: SAUDI_COUNTRY_PREFIX.to_string(),
            national_length: PHONE_LOCAL_LENGTH,
        }
    }
}

pub fn load_config() -> Result<Config> {
    load_env_file()?;

    let mut config = if let Ok(config_file) = env::var("CONFIG_FILE") {
        read_config_file(&config_file)?
    } else {
        Config::default()
    };

    override_with_env(&mut config);

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

fn read_config_file(path: &str) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path))?;
    toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config file: {}", path))
}

fn override_with_env(config: &mut Config) {
    if let Ok(debounce_str) = env::var("BACKOFFICE_DEBOUNCE_MS") {
        if let Ok(debounce) = debounce_str.parse::<u64>() {
            config.query.debounce_ms = debounce;
        }
    }
    if let Ok(limit_str) = env::var("BACKOFFICE_DEFAULT_LIMIT") {
        if let Ok(limit) = limit_str.parse::<i64>() {
            config.query.default_limit = limit;
        }
    }
    if let Ok(field) = env::var("BACKOFFICE_SORT_FIELD") {
        config.query.default_sort_field = field;
    }
    if let Ok(lang_str) = env::var("BACKOFFICE_LOCALE") {
        if let Ok(lang) = lang_str.parse::<Lang>() {
            config.locale.lang = lang;
        }
    }
    if let Ok(code) = env::var("BACKOFFICE_COUNTRY_CODE") {
        config.phone.country_code = code;
    }
    if let Ok(length_str) = env::var("BACKOFFICE_PHONE_LENGTH") {
        if let Ok(length) = length_str.parse::<usize>() {
            config.phone.national_length = length;
        }
    }
    if let Ok(hide_str) = env::var("BACKOFFICE_TOAST_HIDE_MS") {
        if let Ok(hide) = hide_str.parse::<u64>() {
            config.snackbar.auto_hide_ms = hide;
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.query.debounce_ms == 0 {
            return Err(anyhow::anyhow!(
                "debounce_ms must be positive (0 would fire on every keystroke)"
            ));
        }

        if self.query.default_limit < 1 || self.query.default_limit > MAX_LIMIT {
            return Err(anyhow::anyhow!(
                "default_limit ({}) must be between 1 and {}",
                self.query.default_limit,
                MAX_LIMIT
            ));
        }

        if !crate::query::ProductSortWhitelist::is_allowed(&self.query.default_sort_field) {
            return Err(anyhow::anyhow!(
                "default_sort_field '{}' is not a sortable field",
                self.query.default_sort_field
            ));
        }

        if !self.phone.country_code.starts_with('+') || self.phone.country_code.len() < 2 {
            return Err(anyhow::anyhow!(
                "country_code '{}' must look like '+966'",
                self.phone.country_code
            ));
        }

        // E.164: национальная часть не длиннее 15 цифр
        if self.phone.national_length == 0 || self.phone.national_length > 15 {
            return Err(anyhow::anyhow!(
                "national_length ({}) must be between 1 and 15",
                self.phone.national_length
            ));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        env::var("BACKOFFICE_ENV").map(|v| v == "production").unwrap_or(false)
    }

    pub fn print_startup_info(&self) {
        log::info!("🗂️ Backoffice core starting up...");
        log::info!(
            "🌍 Locale: {} ({})",
            self.locale.lang,
            if self.locale.is_rtl() { "RTL" } else { "LTR" }
        );
        log::info!(
            "🔎 Search: {}ms debounce, default sort '{}'",
            self.query.debounce_ms,
            self.query.default_sort_field
        );
        log::info!(
            "📄 Pagination: {} rows per page (max {})",
            self.query.default_limit,
            MAX_LIMIT
        );
        log::info!(
            "📞 Phone: {} + {} digits",
            self.phone.country_code,
            self.phone.national_length
        );

        if !self.is_production() {
            log::warn!("🚧 Running in development mode");
        }
    }
}

pub fn load_env_file() -> Result<()> {
    if let Ok(env_file) = env::var("ENV_FILE") {
        dotenvy::from_filename(&env_file)
            .with_context(|| format!("Failed to load environment file: {}", env_file))?;
    } else if Path::new(".env").exists() {
        dotenvy::dotenv().context("Failed to load .env file")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.query.debounce_ms, 400);
        assert_eq!(config.query.default_limit, 10);
        assert_eq!(config.query.default_sort_field, "orderDate");
        assert_eq!(config.locale.lang, Lang::En);
        assert!(!config.locale.is_rtl());
        assert_eq!(config.phone.country_code, "+966");
        assert_eq!(config.phone.national_length, 9);
        assert_eq!(config.snackbar.auto_hide_ms, 6000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_debounce() {
        let mut config = Config::default();
        config.query.debounce_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_limit() {
        let mut config = Config::default();
        config.query.default_limit = 0;
        assert!(config.validate().is_err());

        config.query.default_limit = 500;
        assert!(config.validate().is_err());

        config.query.default_limit = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_unknown_sort_field() {
        let mut config = Config::default();
        config.query.default_sort_field = "password".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_phone_settings() {
        let mut config = Config::default();
        config.phone.country_code = "966".to_string();
        assert!(config.validate().is_err());

        config.phone.country_code = "+7".to_string();
        assert!(config.validate().is_ok());

        config.phone.national_length = 0;
        assert!(config.validate().is_err());
        config.phone.national_length = 16;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_loading() -> Result<()> {
        let toml_content = r#"
        [query]
        debounce_ms = 250
        default_limit = 25
        default_sort_field = "name"

        [locale]
        lang = "ar"

        [phone]
        country_code = "+971"
        national_length = 9
        "#;

        let temp_file = NamedTempFile::new()?;
        fs::write(temp_file.path(), toml_content)?;

        let config = read_config_file(temp_file.path().to_str().unwrap())?;
        assert_eq!(config.query.debounce_ms, 250);
        assert_eq!(config.query.default_limit, 25);
        assert_eq!(config.query.default_sort_field, "name");
        assert_eq!(config.locale.lang, Lang::Ar);
        assert!(config.locale.is_rtl());
        assert_eq!(config.phone.country_code, "+971");
        // Секция не указана — берётся дефолт
        assert_eq!(config.snackbar.auto_hide_ms, 6000);

        Ok(())
    }

    #[test]
    fn test_partial_toml_uses_defaults() -> Result<()> {
        let toml_content = r#"
        [query]
        debounce_ms = 300
        "#;

        let temp_file = NamedTempFile::new()?;
        fs::write(temp_file.path(), toml_content)?;

        let config = read_config_file(temp_file.path().to_str().unwrap())?;
        assert_eq!(config.query.debounce_ms, 300);
        // Остальные поля секции остались дефолтными
        assert_eq!(config.query.default_limit, 10);
        assert_eq!(config.locale.lang, Lang::En);

        Ok(())
    }

    #[test]
    fn test_toml_rejects_garbage() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "query = {{{").unwrap();
        assert!(read_config_file(temp_file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_env_override() {
        env::set_var("BACKOFFICE_DEBOUNCE_MS", "150");
        env::set_var("BACKOFFICE_LOCALE", "ar");
        env::set_var("BACKOFFICE_COUNTRY_CODE", "+971");

        let mut config = Config::default();
        override_with_env(&mut config);

        assert_eq!(config.query.debounce_ms, 150);
        assert_eq!(config.locale.lang, Lang::Ar);
        assert_eq!(config.phone.country_code, "+971");

        env::remove_var("BACKOFFICE_DEBOUNCE_MS");
        env::remove_var("BACKOFFICE_LOCALE");
        env::remove_var("BACKOFFICE_COUNTRY_CODE");
    }

    #[test]
    fn test_env_override_ignores_unparsable() {
        env::set_var("BACKOFFICE_PHONE_LENGTH", "not-a-number");

        let mut config = Config::default();
        override_with_env(&mut config);
        assert_eq!(config.phone.national_length, 9);

        env::remove_var("BACKOFFICE_PHONE_LENGTH");
    }

    #[test]
    fn test_load_env_file() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let env_path = temp_dir.path().join(".env");
        fs::write(&env_path, "BACKOFFICE_DOTENV_PROBE=loaded")?;

        env::set_var("ENV_FILE", env_path.to_str().unwrap());
        let result = load_env_file();
        env::remove_var("ENV_FILE");

        result?;
        assert_eq!(env::var("BACKOFFICE_DOTENV_PROBE").unwrap(), "loaded");
        env::remove_var("BACKOFFICE_DOTENV_PROBE");
        Ok(())
    }

    #[test]
    fn test_load_config_smoke() {
        env::remove_var("CONFIG_FILE");
        assert!(load_config().is_ok());
    }
}
