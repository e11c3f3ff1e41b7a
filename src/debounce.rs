// src/debounce.rs
//! Отменяемый дебаунс-таймер. Каждый submit перезапускает окно,
//! до колбэка доживает только последнее значение.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;

type SettleFn<T> = Arc<dyn Fn(T) + Send + Sync>;

pub struct Debouncer<T: Send + 'static> {
    window: Duration,
    on_settle: SettleFn<T>,
    /// Номер последнего submit/cancel. Таймер стреляет только если
    /// к моменту истечения окна номер не ушёл вперёд.
    generation: Arc<AtomicU64>,
    slot: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(window: Duration, on_settle: impl Fn(T) + Send + Sync + 'static) -> Self {
        Debouncer {
            window,
            on_settle: Arc::new(on_settle),
            generation: Arc::new(AtomicU64::new(0)),
            slot: Mutex::new(None),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Ставит значение в очередь. Предыдущий неотработавший таймер
    /// отменяется, окно отсчитывается заново.
    pub fn submit(&self, value: T) {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let on_settle = Arc::clone(&self.on_settle);
        let window = self.window;

        let handle = tokio::spawn(async move {
            time::sleep(window).await;
            if generation.load(Ordering::SeqCst) == my_generation {
                on_settle(value);
            }
        });

        if let Some(previous) = self.lock_slot().replace(handle) {
            previous.abort();
        }
    }

    /// Сбрасывает отложенное значение, не вызывая колбэк.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.lock_slot().take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.lock_slot()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    fn lock_slot(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn recorder(window_ms: u64) -> (Debouncer<String>, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Debouncer::new(Duration::from_millis(window_ms), move |value| {
            let _ = tx.send(value);
        });
        (debouncer, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_once_after_window() {
        let (debouncer, mut rx) = recorder(400);
        debouncer.submit("kettle".to_string());

        assert_eq!(rx.recv().await.unwrap(), "kettle");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_resubmit_restarts_window() {
        let (debouncer, mut rx) = recorder(400);
        debouncer.submit("ket".to_string());
        tokio::task::yield_now().await;
        time::advance(Duration::from_millis(200)).await;
        debouncer.submit("kettle".to_string());
        tokio::task::yield_now().await;

        // 399 мс после второго submit: окно ещё не истекло.
        time::advance(Duration::from_millis(399)).await;
        assert!(rx.try_recv().is_err());

        assert_eq!(rx.recv().await.unwrap(), "kettle");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_value() {
        let (debouncer, mut rx) = recorder(400);
        debouncer.submit("ghost".to_string());
        debouncer.cancel();

        time::advance(Duration::from_millis(1000)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let debouncer = Debouncer::new(Duration::from_millis(400), move |value: String| {
                let _ = tx.send(value);
            });
            debouncer.submit("ghost".to_string());
        }

        time::advance(Duration::from_millis(1000)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_is_pending_lifecycle() {
        let (debouncer, mut rx) = recorder(400);
        assert!(!debouncer.is_pending());

        debouncer.submit("kettle".to_string());
        assert!(debouncer.is_pending());

        rx.recv().await.unwrap();
        tokio::task::yield_now().await;
        assert!(!debouncer.is_pending());
    }
}
