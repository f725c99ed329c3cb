//! Low-level HTTP client — `CoinGeckoHttp`.
//!
//! One method per provider endpoint. Returns wire types (conversion to domain
//! types happens in the domain sub-clients). Every call is exactly one round
//! trip: no caching and no retries at this layer.

use crate::domain::asset::wire::{
    CoinMarketResponse, PingResponse, SimplePriceResponse, TrendingResponse,
};
use crate::domain::price_history::wire::MarketChartResponse;
use crate::error::HttpError;
use crate::network::VS_CURRENCY;
use crate::shared::{AssetId, Granularity};

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Low-level HTTP client for the CoinGecko REST API.
#[derive(Clone)]
pub struct CoinGeckoHttp {
    base_url: String,
    client: Client,
}

impl CoinGeckoHttp {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, HttpError> {
        #[allow(unused_mut)]
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(4);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Assets ───────────────────────────────────────────────────────────

    pub async fn get_markets(&self, limit: u32) -> Result<Vec<CoinMarketResponse>, HttpError> {
        let url = format!(
            "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page=1&sparkline=false",
            self.base_url, VS_CURRENCY, limit
        );
        self.get(&url).await
    }

    pub async fn get_trending(&self) -> Result<TrendingResponse, HttpError> {
        let url = format!("{}/search/trending", self.base_url);
        self.get(&url).await
    }

    pub async fn get_simple_price(&self, asset_id: &AssetId) -> Result<SimplePriceResponse, HttpError> {
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies={}",
            self.base_url,
            urlencoding::encode(asset_id.as_str()),
            VS_CURRENCY
        );
        self.get(&url).await
    }

    pub async fn ping(&self) -> Result<PingResponse, HttpError> {
        let url = format!("{}/ping", self.base_url);
        self.get(&url).await
    }

    // ── Price History ────────────────────────────────────────────────────

    pub async fn get_market_chart(
        &self,
        asset_id: &AssetId,
        granularity: Granularity,
    ) -> Result<MarketChartResponse, HttpError> {
        let url = format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.base_url,
            urlencoding::encode(asset_id.as_str()),
            VS_CURRENCY,
            granularity.as_str()
        );
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        tracing::debug!(url, "GET");

        let resp = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(classify)?;
        let status = resp.status();

        if status.is_success() {
            let body = resp.text().await.map_err(classify)?;
            return serde_json::from_str::<T>(&body).map_err(|e| HttpError::Decode(e.to_string()));
        }

        let status_code = status.as_u16();
        let retry_after_ms = retry_after_ms(resp.headers());
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

/// `Retry-After` in delta-seconds, converted to ms. HTTP-date values are ignored.
fn retry_after_ms(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(|secs| secs.saturating_mul(1000))
}

fn classify(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Reqwest(err)
    }
}
