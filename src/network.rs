//! Network constants for the CoinGecko provider.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Quote currency for every price the provider returns.
pub const VS_CURRENCY: &str = "usd";

/// Transport timeout applied to every request on native targets.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
