//! User-facing notifications ("toasts").
//!
//! Producers only see the [`Notifier`] trait. The UI owns a [`ToastQueue`]
//! and drains it once per frame.

use bon::Builder;
use flume::{Receiver, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct Toast {
    #[builder(into)]
    pub title: String,
    #[builder(into)]
    pub message: String,
    #[builder(default = Severity::Info)]
    pub severity: Severity,
}

/// Fire-and-forget notification sink.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: &str, severity: Severity);
}

/// Sending half of the toast channel.
#[derive(Debug, Clone)]
pub struct ToastSender {
    tx: Sender<Toast>,
}

impl Notifier for ToastSender {
    fn notify(&self, title: &str, message: &str, severity: Severity) {
        let toast = Toast::builder()
            .title(title)
            .message(message)
            .severity(severity)
            .build();
        if self.tx.send(toast).is_err() {
            log::warn!("Toast dropped, no receiver: {title}: {message}");
        }
    }
}

/// Receiving half of the toast channel.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    rx: Receiver<Toast>,
}

impl ToastQueue {
    /// Takes every toast queued so far without blocking.
    pub fn drain(&self) -> Vec<Toast> {
        self.rx.try_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

/// Creates a connected toast sender and queue.
pub fn toast_channel() -> (ToastSender, ToastQueue) {
    let (tx, rx) = flume::unbounded();
    (ToastSender { tx }, ToastQueue { rx })
}
