// src/sources.rs
//! Источники списочных данных и их проекция для экранов.
//!
//! Ядро не умеет ходить в сеть: загрузку страницы делает внешний
//! `ListSource`, а `ListSession` следит, чтобы на экран попадал только
//! ответ самого свежего запроса. Опоздавшие ответы отбрасываются.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::watch;

use crate::error::AppResult;
use crate::models::Product;
use crate::query::{ListQuery, Paginated, ProductSortWhitelist, SortDir};

// ==================== LIST SOURCE ====================

/// Поставщик одной страницы списка. Кэширование и дедупликация
/// запросов остаются на его стороне.
#[async_trait]
pub trait ListSource<T>: Send + Sync {
    async fn fetch_page(&self, query: &ListQuery) -> AppResult<Paginated<T>>;
}

// ==================== LIST STATE ====================

/// Проекция результата загрузки, которую рисуют страницы.
/// `error` отдаётся как есть, ядро его не разбирает.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub is_loading: bool,
    pub is_success: bool,
    pub is_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ListState<T> {
    /// До первой загрузки: пусто, без флагов.
    pub fn idle() -> Self {
        ListState {
            items: Vec::new(),
            total_count: 0,
            is_loading: false,
            is_success: false,
            is_error: false,
            error: None,
        }
    }

    pub fn loading() -> Self {
        ListState {
            is_loading: true,
            ..ListState::idle()
        }
    }

    pub fn success(page: Paginated<T>) -> Self {
        ListState {
            total_count: page.total_count,
            items: page.paginated_list,
            is_loading: false,
            is_success: true,
            is_error: false,
            error: None,
        }
    }

    pub fn failure(message: &str) -> Self {
        ListState {
            is_error: true,
            error: Some(message.to_string()),
            ..ListState::idle()
        }
    }

    pub fn from_result(result: AppResult<Paginated<T>>) -> Self {
        match result {
            Ok(page) => ListState::success(page),
            Err(err) => ListState::failure(&err.to_string()),
        }
    }
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        ListState::idle()
    }
}

// ==================== LIST SESSION ====================

/// Прогоняет снимки `ListQuery` через источник и держит последнюю
/// проекцию в watch-канале.
///
/// Каждая загрузка получает возрастающий номер; применяется только
/// ответ с номером новее последнего применённого. Так побеждает
/// последний запрос, даже если ответы пришли не по порядку.
pub struct ListSession<T: Clone> {
    source: Arc<dyn ListSource<T>>,
    tx: watch::Sender<ListState<T>>,
    tickets: AtomicU64,
    applied: AtomicU64,
}

impl<T: Clone + Send + Sync + 'static> ListSession<T> {
    pub fn new(source: Arc<dyn ListSource<T>>) -> Self {
        let (tx, _rx) = watch::channel(ListState::idle());
        ListSession {
            source,
            tx,
            tickets: AtomicU64::new(0),
            applied: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.tx.subscribe()
    }

    pub fn state(&self) -> ListState<T> {
        self.tx.borrow().clone()
    }

    /// Регистрирует начало загрузки: выдаёт номер и поднимает
    /// `is_loading`, не убирая уже показанные строки.
    pub fn begin(&self) -> u64 {
        let ticket = self.tickets.fetch_add(1, AtomicOrdering::SeqCst) + 1;
        self.tx.send_modify(|state| state.is_loading = true);
        ticket
    }

    /// Применяет ответ загрузки. Если более новый ответ уже применён,
    /// ничего не меняет и возвращает false.
    pub fn apply(&self, ticket: u64, result: AppResult<Paginated<T>>) -> bool {
        let mut newest = self.applied.load(AtomicOrdering::SeqCst);
        loop {
            if ticket <= newest {
                log::debug!(
                    "🗑 Discarding stale response #{} (newest applied is #{})",
                    ticket,
                    newest
                );
                return false;
            }
            match self.applied.compare_exchange(
                newest,
                ticket,
                AtomicOrdering::SeqCst,
                AtomicOrdering::SeqCst,
            ) {
                Ok(_) => break,
                Err(actual) => newest = actual,
            }
        }

        self.tx.send_replace(ListState::from_result(result));
        true
    }

    /// Одна загрузка целиком: номер, запрос к источнику, применение.
    pub async fn refresh(&self, query: &ListQuery) -> ListState<T> {
        let ticket = self.begin();
        log::debug!("⏳ Fetch #{}: {}", ticket, query.to_query_string());
        let result = self.source.fetch_page(query).await;
        self.apply(ticket, result);
        self.state()
    }

    /// Цикл сессии: загружает текущий снимок запроса и ждёт следующего.
    /// Завершается, когда отправитель снимков уничтожен.
    pub async fn run(&self, mut queries: watch::Receiver<ListQuery>) {
        loop {
            let query = queries.borrow_and_update().clone();
            self.refresh(&query).await;
            if queries.changed().await.is_err() {
                log::debug!("📴 Query stream closed, list session stopping");
                break;
            }
        }
    }
}

// ==================== IN-MEMORY PRODUCT SOURCE ====================

/// Источник товаров в памяти: те же правила поиска, фильтров,
/// сортировки и нарезки страниц, что ждут от удалённого API.
/// Используется тестами и демо-режимом без бэкенда.
pub struct MemoryProductSource {
    products: Vec<Product>,
}

impl MemoryProductSource {
    pub fn new(products: Vec<Product>) -> Self {
        MemoryProductSource { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl ListSource<Product> for MemoryProductSource {
    async fn fetch_page(&self, query: &ListQuery) -> AppResult<Paginated<Product>> {
        let mut rows: Vec<&Product> = self
            .products
            .iter()
            .filter(|product| match query.search_text.as_deref() {
                Some(needle) => product.matches_search(needle),
                None => true,
            })
            .filter(|product| query.filters.matches(product))
            .collect();

        sort_products(&mut rows, &query.sort_by, query.sort_dir);

        // totalCount считается до нарезки страницы
        let total_count = rows.len() as i64;
        let offset = ((query.page - 1) * query.limit).max(0) as usize;
        let items: Vec<Product> = rows
            .into_iter()
            .skip(offset)
            .take(query.limit.max(0) as usize)
            .cloned()
            .collect();

        Ok(Paginated::new(items, total_count))
    }
}

fn sort_products(rows: &mut [&Product], field: &str, dir: SortDir) {
    fn status_key(product: &Product) -> &str {
        product.status.as_ref()
    }

    let field = ProductSortWhitelist::validate(field);
    rows.sort_by(|a, b| {
        let ordering = match field {
            "name" => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            "category" => a.category.to_lowercase().cmp(&b.category.to_lowercase()),
            "price" => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
            "status" => status_key(a).cmp(status_key(b)),
            "createdAt" => a.created_at.cmp(&b.created_at),
            _ => a.order_date.cmp(&b.order_date),
        };
        match dir {
            SortDir::Asc => ordering,
            SortDir::Desc => ordering.reverse(),
        }
    });
}

// ==================== TESTS ====================
