// src/i18n.rs
//! Localized UI messages (English and Arabic) with `{placeholder}`
//! interpolation. Missing keys fall back to the English table.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::error::AppResult;

// ==================== LANGUAGE ====================

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumString, Display, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    Ar,
}

impl Default for Lang {
    fn default() -> Self {
        Lang::En
    }
}

// ==================== TRANSLATION TABLE ====================

/// Плоская таблица сообщений: ключ → шаблон.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Translations {
    messages: HashMap<String, String>,
}

impl Translations {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Загружает таблицу из JSON-объекта вида `{"key": "template"}`.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        let messages: HashMap<String, String> = serde_json::from_str(raw)?;
        Ok(Translations { messages })
    }
}

fn table(pairs: &[(&str, &str)]) -> Translations {
    Translations {
        messages: pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

lazy_static! {
    static ref EN: Translations = table(&[
        ("firstNameRequired", "First name is required"),
        ("lastNameRequired", "Last name is required"),
        ("phoneNumberRequired", "Phone number is required"),
        (
            "phoneNumberMinLength",
            "Phone number must be at least {minLength} digits",
        ),
        (
            "phoneNumberMaxLength",
            "Phone number must be at most {maxLength} digits",
        ),
        ("roleRequired", "Role is required"),
        (
            "employeeCreatedSuccess",
            "Employee @ has been created successfully!",
        ),
        ("somethingWentWrong", "Something went wrong!"),
        (
            "resourceCreatedSuccess",
            "The {resourceName} has been created successfully",
        ),
        (
            "resourceDeletedSuccess",
            "The {resourceName} has been deleted successfully",
        ),
        ("noResourcesFoundTitle", "No {resourceName} found"),
        (
            "noResourcesFoundMessage",
            "We could not load any {resourceName}. Please try again later.",
        ),
        ("resourceNameProducts", "products"),
    ]);
    static ref AR: Translations = table(&[
        ("firstNameRequired", "الاسم الأول مطلوب"),
        ("lastNameRequired", "اسم العائلة مطلوب"),
        ("phoneNumberRequired", "رقم الهاتف مطلوب"),
        (
            "phoneNumberMinLength",
            "يجب ألا يقل رقم الهاتف عن {minLength} أرقام",
        ),
        (
            "phoneNumberMaxLength",
            "يجب ألا يزيد رقم الهاتف عن {maxLength} أرقام",
        ),
        ("roleRequired", "الدور مطلوب"),
        ("employeeCreatedSuccess", "تم إنشاء الموظف @ بنجاح!"),
        ("somethingWentWrong", "حدث خطأ ما!"),
        ("resourceCreatedSuccess", "تم إنشاء {resourceName} بنجاح"),
        ("noResourcesFoundTitle", "لا توجد {resourceName}"),
        (
            "noResourcesFoundMessage",
            "تعذر تحميل {resourceName}. يرجى المحاولة مرة أخرى لاحقًا.",
        ),
        ("resourceNameProducts", "منتجات"),
    ]);
}

fn builtin(lang: Lang) -> &'static Translations {
    match lang {
        Lang::En => &EN,
        Lang::Ar => &AR,
    }
}

// ==================== LOOKUP & RENDERING ====================

/// Возвращает шаблон по ключу. Порядок поиска: таблица языка,
/// затем английская таблица, затем сам ключ.
pub fn translate(lang: Lang, key: &str) -> String {
    if let Some(msg) = builtin(lang).get(key) {
        return msg.to_string();
    }
    if let Some(msg) = EN.get(key) {
        return msg.to_string();
    }
    log::warn!("⚠️ Missing translation for key '{}'", key);
    key.to_string()
}

/// Подставляет значения в шаблон: каждое вхождение `{name}`
/// заменяется на значение. Неизвестные плейсхолдеры не трогаем.
pub fn render_template(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in params {
        out = out.replace(&format!("{{{}}}", name), value);
    }
    out
}

pub fn translate_with(lang: Lang, key: &str, params: &[(&str, &str)]) -> String {
    render_template(&translate(lang, key), params)
}

/// Заголовок и текст плашки «ничего не нашли» для списка товаров.
/// Название ресурса тоже локализуется, как в исходных экранах.
pub fn products_not_found(lang: Lang) -> (String, String) {
    let resource = translate(lang, "resourceNameProducts");
    (
        translate_with(lang, "noResourcesFoundTitle", &[("resourceName", &resource)]),
        translate_with(
            lang,
            "noResourcesFoundMessage",
            &[("resourceName", &resource)],
        ),
    )
}
