//! User-facing notification sink.
//!
//! The crate never renders anything itself. Whenever a provider operation
//! fails, the client hands one [`Notification`] to the injected [`Notifier`]
//! and moves on; nothing is read back.

use crate::error::FetchError;

/// Notification severity, matching the usual toast levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub detail: String,
}

impl Notification {
    pub fn new(severity: Severity, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            detail: detail.into(),
        }
    }

    /// The standard error notification for a failed provider operation:
    /// title `"Failed to load <context>"`.
    pub fn for_failure(err: &FetchError) -> Self {
        let context = err.context().unwrap_or("data");
        Self::new(
            Severity::Error,
            format!("Failed to load {context}"),
            err.to_string(),
        )
    }
}

/// Fire-and-forget notification sink.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<F> Notifier for F
where
    F: Fn(Notification) + Send + Sync,
{
    fn notify(&self, notification: Notification) {
        self(notification)
    }
}

/// Default sink: emits a `tracing` event per notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.severity {
            Severity::Error => tracing::error!(title = %n.title, detail = %n.detail, "notification"),
            Severity::Warning => tracing::warn!(title = %n.title, detail = %n.detail, "notification"),
            Severity::Info | Severity::Success => {
                tracing::info!(title = %n.title, detail = %n.detail, "notification")
            }
        }
    }
}
