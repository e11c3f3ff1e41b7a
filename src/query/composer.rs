// src/query/composer.rs
//! Сборка параметров списка в `ListQuery`.
//!
//! Поисковый ввод проходит через дебаунс и попадает в состояние только
//! после паузы в наборе. Фильтры, сортировка и пагинация применяются
//! сразу. Каждое фактическое изменение публикует новый снимок в watch-канал,
//! одинаковые подряд снимки не публикуются.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;

use crate::config::QueryConfig;
use crate::debounce::Debouncer;

use super::{
    ListQuery, PageState, ProductFilters, SortDir, SortSpec, DEFAULT_PAGE,
};

// ==================== STATE ====================

/// Чистое состояние без таймеров и каналов. Композеру принадлежит
/// единственный экземпляр под мьютексом.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListQueryState {
    pub search_text: Option<String>,
    pub filters: ProductFilters,
    pub sort: SortSpec,
    pub pages: PageState,
}

impl ListQueryState {
    pub fn from_config(config: &QueryConfig) -> Self {
        ListQueryState {
            search_text: None,
            filters: ProductFilters::default(),
            sort: SortSpec::new(&config.default_sort_field, SortDir::Asc),
            pages: PageState::new(DEFAULT_PAGE, config.default_limit),
        }
    }

    /// Отстоявшийся поисковый ввод: обрезаем пробелы, пустую строку
    /// считаем отсутствием поиска.
    pub fn set_search_settled(&mut self, raw: &str) -> bool {
        let settled = {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };
        if self.search_text == settled {
            return false;
        }
        self.search_text = settled;
        true
    }

    /// Панель фильтров отдаёт набор целиком.
    pub fn replace_filters(&mut self, filters: ProductFilters) {
        self.filters = filters;
    }

    pub fn toggle_sort(&mut self, field: &str) {
        self.sort.toggle_field(field);
    }

    pub fn set_sort(&mut self, field: &str, dir: SortDir) {
        self.sort = SortSpec::new(field, dir);
    }

    pub fn set_page(&mut self, page: i64) {
        self.pages.set_page(page);
    }

    pub fn set_limit(&mut self, limit: i64) {
        self.pages.set_limit(limit);
    }

    /// Снимок текущего состояния.
    pub fn compose(&self) -> ListQuery {
        ListQuery {
            search_text: self.search_text.clone(),
            filters: self.filters.clone(),
            sort_by: self.sort.sort_by.clone(),
            sort_dir: self.sort.sort_dir,
            page: self.pages.page,
            limit: self.pages.limit,
        }
    }
}

// ==================== COMPOSER ====================

pub struct ListQueryComposer {
    state: Arc<Mutex<ListQueryState>>,
    tx: Arc<watch::Sender<ListQuery>>,
    search: Debouncer<String>,
}

impl ListQueryComposer {
    pub fn new(config: &QueryConfig) -> Self {
        let state = Arc::new(Mutex::new(ListQueryState::from_config(config)));
        let initial = lock(&state).compose();
        let (tx, _rx) = watch::channel(initial);
        let tx = Arc::new(tx);

        let settle_state = Arc::clone(&state);
        let settle_tx = Arc::clone(&tx);
        let search = Debouncer::new(
            Duration::from_millis(config.debounce_ms),
            move |raw: String| {
                let mut guard = lock(&settle_state);
                if guard.set_search_settled(&raw) {
                    log::info!("🔍 Search settled: {:?}", guard.search_text);
                    publish(&settle_tx, &guard);
                }
            },
        );

        ListQueryComposer { state, tx, search }
    }

    pub fn with_defaults() -> Self {
        ListQueryComposer::new(&QueryConfig::default())
    }

    /// Подписка на снимки. Новый подписчик сразу видит текущий снимок
    /// как уже просмотренный.
    pub fn subscribe(&self) -> watch::Receiver<ListQuery> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> ListQuery {
        self.tx.borrow().clone()
    }

    /// Поисковый ввод по мере набора. В состояние попадёт только
    /// значение, пережившее окно дебаунса.
    pub fn set_search_text(&self, raw: &str) {
        self.search.submit(raw.to_string());
    }

    /// Отменяет недоотстоявшийся поисковый ввод.
    pub fn cancel_pending_search(&self) {
        self.search.cancel();
    }

    pub fn has_pending_search(&self) -> bool {
        self.search.is_pending()
    }

    pub fn replace_filters(&self, filters: ProductFilters) {
        let mut guard = lock(&self.state);
        guard.replace_filters(filters);
        publish(&self.tx, &guard);
    }

    pub fn toggle_sort(&self, field: &str) {
        let mut guard = lock(&self.state);
        guard.toggle_sort(field);
        publish(&self.tx, &guard);
    }

    pub fn set_sort(&self, field: &str, dir: SortDir) {
        let mut guard = lock(&self.state);
        guard.set_sort(field, dir);
        publish(&self.tx, &guard);
    }

    pub fn set_page(&self, page: i64) {
        let mut guard = lock(&self.state);
        guard.set_page(page);
        publish(&self.tx, &guard);
    }

    pub fn set_limit(&self, limit: i64) {
        let mut guard = lock(&self.state);
        guard.set_limit(limit);
        publish(&self.tx, &guard);
    }
}

fn lock(state: &Mutex<ListQueryState>) -> MutexGuard<'_, ListQueryState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Публикует снимок, если он отличается от последнего опубликованного.
fn publish(tx: &watch::Sender<ListQuery>, state: &ListQueryState) {
    let next = state.compose();
    tx.send_if_modified(|current| {
        if *current == next {
            false
        } else {
            *current = next;
            true
        }
    });
}

// ==================== TESTS ====================
