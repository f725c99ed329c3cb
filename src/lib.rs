//! # price-compare
//!
//! Core of a comparative price chart: list the top crypto assets, fetch price
//! history for a primary and an optional compare asset, and merge both into
//! one timeline ready to render.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Types, formatting, domain models, alignment (always available, no I/O)
//! 2. **HTTP API** — `CoinGeckoHttp`, one method per provider endpoint
//! 3. **High-Level Client** — `CoinGeckoClient` with nested sub-clients and failure notifications
//! 4. **Coordinator** — Per-slot request state, series cache, stale-response suppression, view-model
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use price_compare::prelude::*;
//!
//! let client = CoinGeckoClient::builder().build()?;
//! let mut session = ChartSession::new(client);
//!
//! session.load_assets().await?;
//! session.select_secondary(Some("ethereum".into()))?;
//! session.settle().await;
//!
//! let view = session.view();
//! for row in view.rows.iter() {
//!     println!("{} {:?} {:?}", view.time_label(row), row.primary, row.secondary);
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and display formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified error types.
pub mod error;

/// Provider URL and currency constants.
pub mod network;

/// User-facing failure notifications.
pub mod notify;

/// The `PriceSource` seam between coordinator and provider.
pub mod source;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// Low-level HTTP client.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `CoinGeckoClient` — the provider entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 4: Coordinator ─────────────────────────────────────────────────────

/// Request coordination and the chart view-model.
pub mod coordinator;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{AssetId, Granularity};

    // Formatting
    pub use crate::shared::fmt::{
        format_change, format_price, format_price_short, format_timestamp, format_timestamp_in,
    };

    // Domain types — asset
    pub use crate::domain::asset::{Asset, AssetValidationError, ChangeDirection, TrendingCoin};

    // Domain types — price history
    pub use crate::domain::price_history::{
        AlignStrategy, AlignedRow, PricePoint, Series, SeriesCache, SeriesValidationError,
    };

    // Errors
    pub use crate::error::{ErrorKind, FetchError, HttpError, SdkError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, VS_CURRENCY};

    // Notifications
    pub use crate::notify::{Notification, Notifier, Severity, TracingNotifier};

    // Provider seam
    pub use crate::source::PriceSource;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        AssetsClient, CoinGeckoClient, CoinGeckoClientBuilder, PriceHistorySubClient,
    };

    // Coordinator
    pub use crate::coordinator::{
        AssetSummary, ChartSession, FetchTicket, RequestCoordinator, RequestState, SessionConfig,
        Slot, ViewModel,
    };
}
