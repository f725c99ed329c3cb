//! High-level client — `CoinGeckoClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`. This module
//! keeps the builder, the injected notifier, and the accessor methods. The
//! client holds no mutable state: caching is the coordinator's business.

use crate::domain::asset::client::Assets;
use crate::domain::price_history::client::PriceHistoryClient;
use crate::error::{FetchError, SdkError};
use crate::http::CoinGeckoHttp;
use crate::notify::{Notification, Notifier, TracingNotifier};

use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::asset::client::Assets as AssetsClient;
pub use crate::domain::price_history::client::PriceHistoryClient as PriceHistorySubClient;

/// The primary entry point for provider access.
///
/// Provides nested sub-client accessors for each domain:
/// `client.assets()`, `client.price_history()`.
#[derive(Clone)]
pub struct CoinGeckoClient {
    pub(crate) http: CoinGeckoHttp,
    pub(crate) notifier: Arc<dyn Notifier>,
}

impl CoinGeckoClient {
    pub fn builder() -> CoinGeckoClientBuilder {
        CoinGeckoClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn assets(&self) -> Assets<'_> {
        Assets { client: self }
    }

    pub fn price_history(&self) -> PriceHistoryClient<'_> {
        PriceHistoryClient { client: self }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Log a failed operation, hand it to the notifier once, and give it back
    /// for propagation.
    pub(crate) fn report(&self, err: FetchError) -> FetchError {
        tracing::warn!(
            context = err.context().unwrap_or_default(),
            kind = %err.kind(),
            "Provider request failed: {}",
            err
        );
        self.notifier.notify(Notification::for_failure(&err));
        err
    }
}

impl std::fmt::Debug for CoinGeckoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinGeckoClient")
            .field("base_url", &self.http.base_url())
            .finish_non_exhaustive()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct CoinGeckoClientBuilder {
    base_url: String,
    timeout: Duration,
    notifier: Arc<dyn Notifier>,
}

impl Default for CoinGeckoClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(crate::network::DEFAULT_TIMEOUT_SECS),
            notifier: Arc::new(TracingNotifier),
        }
    }
}

impl CoinGeckoClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Transport timeout; the only bound on how long a fetch stays loading.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sink for failure notifications. Defaults to [`TracingNotifier`].
    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    pub fn build(self) -> Result<CoinGeckoClient, SdkError> {
        if self.base_url.trim().is_empty() {
            return Err(SdkError::Validation("base URL must not be empty".to_string()));
        }
        Ok(CoinGeckoClient {
            http: CoinGeckoHttp::new(&self.base_url, self.timeout)?,
            notifier: self.notifier,
        })
    }
}
