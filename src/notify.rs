//! Transient notifications
//!
//! Toasts shown after saves, status changes and failures. Each toast
//! expires on its own; success and info toasts clear after 3 seconds,
//! errors and warnings after 5.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastLevel {
    /// How long a toast of this level stays up
    pub fn ttl(&self) -> Duration {
        match self {
            ToastLevel::Success | ToastLevel::Info => Duration::milliseconds(3000),
            ToastLevel::Error | ToastLevel::Warning => Duration::milliseconds(5000),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ToastLevel::Success => "✓",
            ToastLevel::Error => "✕",
            ToastLevel::Warning => "!",
            ToastLevel::Info => "i",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl Toast {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.symbol(), self.message)
    }
}

#[derive(Debug, Default)]
struct Queue {
    next_id: u64,
    toasts: Vec<Toast>,
}

/// Shared toast queue; clones see the same toasts
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    queue: Arc<Mutex<Queue>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_queue<T>(&self, f: impl FnOnce(&mut Queue) -> T) -> T {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut queue)
    }

    /// Show a toast now. Returns its id.
    pub fn push(&self, level: ToastLevel, message: impl Into<String>) -> u64 {
        self.push_at(level, message, Utc::now())
    }

    /// Show a toast as of `now`
    pub fn push_at(&self, level: ToastLevel, message: impl Into<String>, now: DateTime<Utc>) -> u64 {
        let message = message.into();
        tracing::debug!(level = ?level, message = %message, "Notification");

        self.with_queue(|queue| {
            queue.next_id += 1;
            let id = queue.next_id;
            queue.toasts.push(Toast {
                id,
                level,
                message,
                expires_at: now + level.ttl(),
            });
            id
        })
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(ToastLevel::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.push(ToastLevel::Error, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> u64 {
        self.push(ToastLevel::Warning, message)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.push(ToastLevel::Info, message)
    }

    /// Remove one toast. Returns whether it was still shown.
    pub fn dismiss(&self, id: u64) -> bool {
        self.with_queue(|queue| {
            let before = queue.toasts.len();
            queue.toasts.retain(|t| t.id != id);
            queue.toasts.len() != before
        })
    }

    /// Drop expired toasts. Returns how many were removed.
    pub fn prune(&self, now: DateTime<Utc>) -> usize {
        self.with_queue(|queue| {
            let before = queue.toasts.len();
            queue.toasts.retain(|t| !t.is_expired(now));
            before - queue.toasts.len()
        })
    }

    /// Toasts still visible at `now`, oldest first
    pub fn active(&self, now: DateTime<Utc>) -> Vec<Toast> {
        self.with_queue(|queue| {
            queue
                .toasts
                .iter()
                .filter(|t| !t.is_expired(now))
                .cloned()
                .collect()
        })
    }

    /// Take every queued toast, expired or not
    pub fn drain(&self) -> Vec<Toast> {
        self.with_queue(|queue| std::mem::take(&mut queue.toasts))
    }

    pub fn len(&self) -> usize {
        self.with_queue(|queue| queue.toasts.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
