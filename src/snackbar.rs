// src/snackbar.rs
//! Очередь всплывающих уведомлений. Сами тосты рисует хост-приложение,
//! здесь только контракт `Notifier` и его in-memory реализация.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

// ==================== SEVERITY & TOAST ====================

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Info
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    /// `None` — взять длительность из настроек очереди.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_hide_ms: Option<u64>,
}

impl Toast {
    pub fn new(message: &str, severity: Severity) -> Self {
        Toast {
            message: message.to_string(),
            severity,
            auto_hide_ms: None,
        }
    }

    pub fn success(message: &str) -> Self {
        Toast::new(message, Severity::Success)
    }

    pub fn error(message: &str) -> Self {
        Toast::new(message, Severity::Error)
    }

    pub fn warning(message: &str) -> Self {
        Toast::new(message, Severity::Warning)
    }

    pub fn info(message: &str) -> Self {
        Toast::new(message, Severity::Info)
    }

    pub fn with_auto_hide(mut self, ms: u64) -> Self {
        self.auto_hide_ms = Some(ms);
        self
    }
}

// ==================== OPTIONS ====================

/// Угол экрана, к которому прижимаются тосты.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display, AsRefStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum AnchorCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Default for AnchorCorner {
    fn default() -> Self {
        AnchorCorner::BottomLeft
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnackbarOptions {
    /// Сколько миллисекунд тост висит на экране.
    pub auto_hide_ms: u64,
    pub anchor: AnchorCorner,
    /// Сколько тостов держим в очереди одновременно.
    pub max_stack: usize,
}

impl Default for SnackbarOptions {
    fn default() -> Self {
        SnackbarOptions {
            auto_hide_ms: 6000,
            anchor: AnchorCorner::BottomLeft,
            max_stack: 3,
        }
    }
}

// ==================== NOTIFIER ====================

pub trait Notifier: Send + Sync {
    fn enqueue(&self, toast: Toast);

    fn success(&self, message: &str) {
        self.enqueue(Toast::success(message));
    }

    fn error(&self, message: &str) {
        self.enqueue(Toast::error(message));
    }
}

/// Notifier, складывающий тосты в память. Используется в тестах
/// и как буфер, пока хост не подключил реальный снэкбар.
pub struct MemoryNotifier {
    options: SnackbarOptions,
    queue: Mutex<Vec<Toast>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        MemoryNotifier::with_options(SnackbarOptions::default())
    }

    pub fn with_options(options: SnackbarOptions) -> Self {
        MemoryNotifier {
            options,
            queue: Mutex::new(Vec::new()),
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.lock_queue().clone()
    }

    pub fn drain(&self) -> Vec<Toast> {
        self.lock_queue().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.lock_queue().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_queue().is_empty()
    }

    fn lock_queue(&self) -> std::sync::MutexGuard<'_, Vec<Toast>> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryNotifier {
    fn default() -> Self {
        MemoryNotifier::new()
    }
}

impl Notifier for MemoryNotifier {
    fn enqueue(&self, toast: Toast) {
        let mut resolved = toast;
        if resolved.auto_hide_ms.is_none() {
            resolved.auto_hide_ms = Some(self.options.auto_hide_ms);
        }
        log::info!("🔔 [{}] {}", resolved.severity, resolved.message);

        let mut queue = self.lock_queue();
        queue.push(resolved);
        while queue.len() > self.options.max_stack {
            let dropped = queue.remove(0);
            log::warn!("⚠️ Snackbar overflow, dropping toast: {}", dropped.message);
        }
    }
}
