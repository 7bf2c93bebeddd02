//! Transient notifications
//!
//! Toasts expire [`TOAST_TTL`] after they are raised. The queue does not run
//! timers; callers prune it with the current instant.

use std::time::{Duration, Instant};

/// How long a toast stays visible
pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
}

/// A notification shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self::at(message, kind, Instant::now())
    }

    pub fn at(message: impl Into<String>, kind: ToastKind, created_at: Instant) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at,
        }
    }

    /// Whether the toast should be gone by `now`
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= TOAST_TTL
    }
}

/// Toasts in the order they were raised
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast) {
        tracing::debug!(kind = ?toast.kind, message = %toast.message, "Toast raised");
        self.toasts.push(toast);
    }

    /// Drop every toast that has expired by `now`
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|toast| !toast.is_expired(now));
    }

    /// Dismiss everything
    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    /// Most recently raised toast
    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> + '_ {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
