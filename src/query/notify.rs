//! User-facing notifications.
//!
//! Every read and write error, and every successful write, ends up as one
//! [`Toast`] handed to the client's [`Notifier`]. The dashboard renders
//! whatever a [`ToastQueue`] collects; headless callers can use [`LogNotifier`].

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Success,
    Error,
}

/// A short message shown to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    /// An error toast carrying `error`'s message, or `fallback` when that is blank
    pub fn from_error(error: &impl std::fmt::Display, fallback: &str) -> Self {
        let message = error.to_string();
        if message.trim().is_empty() {
            Self::error(fallback)
        } else {
            Self::error(message)
        }
    }
}

/// Receives toasts from the query layer, controllers and forms
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Collects toasts until the view drains them
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every pending toast, oldest first
    pub fn drain(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|mut toasts| std::mem::take(&mut *toasts))
            .unwrap_or_default()
    }

    /// Pending toasts without consuming them
    pub fn snapshot(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|toasts| toasts.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.toasts.lock().map(|toasts| toasts.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, toast: Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }
    }
}

/// Writes toasts to the log instead of showing them
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Success => {
                crate::debug_log!("[TOAST] {}", toast.message);
            }
            ToastKind::Error => {
                crate::warn_log!("[TOAST] {}", toast.message);
            }
        }
    }
}
