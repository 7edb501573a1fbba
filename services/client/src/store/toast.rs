//! services/client/src/store/toast.rs
//!
//! The notification channel: a single-slot, auto-clearing toast.
//!
//! Each `show` stamps the slot with a fresh token and schedules a clear for
//! that token only. A timer whose token has been superseded does nothing, so
//! a newer toast is never blanked by an older toast's timer.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tracing::debug;

/// Capacity of the per-message event stream. Lagging subscribers lose the oldest.
const EVENT_CAPACITY: usize = 32;

/// What the UI renders for the toast slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub visible: bool,
    token: u64,
}

/// Handle to the toast slot. Cheap to clone; all clones share one slot.
#[derive(Clone)]
pub struct Toaster {
    slot: Arc<watch::Sender<Toast>>,
    events: broadcast::Sender<String>,
    delay: Duration,
}

impl Toaster {
    pub fn new(delay: Duration) -> Self {
        let (slot, _) = watch::channel(Toast::default());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            slot: Arc::new(slot),
            events,
            delay,
        }
    }

    /// Puts `message` in the slot and schedules it to clear after the delay.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, message: impl Into<String>) {
        let message = message.into();
        let mut token = 0;
        self.slot.send_modify(|toast| {
            toast.token += 1;
            token = toast.token;
            toast.message = message.clone();
            toast.visible = true;
        });
        debug!("toast #{}: {}", token, message);
        // No subscribers is not an error.
        let _ = self.events.send(message);

        let slot = self.slot.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            slot.send_if_modified(|toast| {
                if toast.token != token {
                    return false;
                }
                toast.visible = false;
                toast.message.clear();
                true
            });
        });
    }

    /// Current contents of the slot.
    pub fn current(&self) -> Toast {
        self.slot.borrow().clone()
    }

    /// Observes the slot; yields whenever a toast appears or clears.
    pub fn watch(&self) -> watch::Receiver<Toast> {
        self.slot.subscribe()
    }

    /// Stream of every message shown from now on, one item per `show`.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.events.subscribe()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};

    #[tokio::test(start_paused = true)]
    async fn clears_after_fixed_delay() {
        let toaster = Toaster::new(Duration::from_secs(3));
        let mut rx = toaster.watch();
        let start = Instant::now();

        toaster.show("A");
        rx.borrow_and_update();
        assert_eq!(toaster.current().message, "A");
        assert!(toaster.current().visible);

        rx.changed().await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(3) && elapsed < Duration::from_millis(3010));
        let toast = toaster.current();
        assert!(!toast.visible);
        assert_eq!(toast.message, "");
    }

    #[tokio::test(start_paused = true)]
    async fn stale_timer_does_not_blank_newer_message() {
        let toaster = Toaster::new(Duration::from_secs(3));

        toaster.show("A");
        sleep(Duration::from_secs(2)).await;
        toaster.show("B");

        // Past A's deadline (t=3) but before B's (t=5).
        sleep(Duration::from_millis(1500)).await;
        let toast = toaster.current();
        assert!(toast.visible);
        assert_eq!(toast.message, "B");

        // Past B's deadline.
        sleep(Duration::from_secs(2)).await;
        let toast = toaster.current();
        assert!(!toast.visible);
        assert!(toast.message.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn every_show_is_broadcast() {
        let toaster = Toaster::new(Duration::from_secs(3));
        let mut events = toaster.subscribe();

        toaster.show("first");
        toaster.show("second");

        assert_eq!(events.recv().await.unwrap(), "first");
        assert_eq!(events.recv().await.unwrap(), "second");
        assert!(events.try_recv().is_err());
        assert_eq!(toaster.current().message, "second");
    }
}
