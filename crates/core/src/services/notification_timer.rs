use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::models::notification::{Notification, NotificationChannel};

/// How long a notification stays visible unless configured otherwise.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(2000);

#[derive(Default)]
struct Slot {
    current: Option<Notification>,
    /// Bumped on every `show`/`clear`. An expiry only clears the slot if the
    /// generation it was armed with is still current.
    generation: u64,
    expiry: Option<JoinHandle<()>>,
}

/// One notification channel: at most one message, cleared automatically
/// after a fixed delay.
///
/// A newer `show` replaces the message and restarts the countdown; the
/// previous expiry is aborted and can never clear the newer message.
///
/// `show` spawns the expiry on the current Tokio runtime and must be called
/// from within one.
pub struct NotificationTimer {
    channel: NotificationChannel,
    ttl: Duration,
    slot: Arc<Mutex<Slot>>,
}

impl NotificationTimer {
    pub fn new(channel: NotificationChannel, ttl: Duration) -> Self {
        Self {
            channel,
            ttl,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    pub fn channel(&self) -> NotificationChannel {
        self.channel
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Display `message` now and clear it `ttl` from now, unless superseded.
    pub fn show(&self, message: impl Into<String>) {
        let notification = Notification::new(message);
        let deadline = Instant::now() + self.ttl;

        let mut slot = self.lock();
        slot.generation = slot.generation.wrapping_add(1);
        let generation = slot.generation;
        if let Some(pending) = slot.expiry.take() {
            pending.abort();
        }
        slot.current = Some(notification);

        // Weak so a torn-down channel is never written to by a late expiry.
        let weak = Arc::downgrade(&self.slot);
        let channel = self.channel;
        slot.expiry = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let Some(slot) = weak.upgrade() else {
                return;
            };
            let mut slot = slot.lock().unwrap_or_else(|e| e.into_inner());
            if slot.generation == generation {
                slot.current = None;
                slot.expiry = None;
                log::debug!("{channel} notification expired");
            }
        }));
    }

    /// Remove the message immediately and cancel its expiry.
    pub fn clear(&self) {
        let mut slot = self.lock();
        slot.generation = slot.generation.wrapping_add(1);
        if let Some(pending) = slot.expiry.take() {
            pending.abort();
        }
        slot.current = None;
    }

    /// The message currently on display, if any.
    pub fn current(&self) -> Option<Notification> {
        self.lock().current.clone()
    }

    pub fn is_active(&self) -> bool {
        self.lock().current.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for NotificationTimer {
    fn drop(&mut self) {
        if let Some(pending) = self.lock().expiry.take() {
            pending.abort();
        }
    }
}

impl std::fmt::Debug for NotificationTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationTimer")
            .field("channel", &self.channel)
            .field("ttl", &self.ttl)
            .field("active", &self.is_active())
            .finish()
    }
}
