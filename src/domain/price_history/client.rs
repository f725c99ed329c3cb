//! Price history sub-client — one series per asset and window.

use crate::client::CoinGeckoClient;
use crate::domain::price_history::Series;
use crate::error::FetchError;
use crate::shared::{AssetId, Granularity};

const PRICE_HISTORY: &str = "price history";

/// Sub-client for price history operations.
pub struct PriceHistoryClient<'a> {
    pub(crate) client: &'a CoinGeckoClient,
}

impl<'a> PriceHistoryClient<'a> {
    /// Fetch one series. Always a network round trip; callers that want
    /// memoization consult a [`SeriesCache`](super::SeriesCache) first.
    pub async fn get(&self, asset_id: &AssetId, granularity: Granularity) -> Result<Series, FetchError> {
        let resp = self
            .client
            .http
            .get_market_chart(asset_id, granularity)
            .await
            .map_err(|e| self.client.report(FetchError::from_http(PRICE_HISTORY, &e)))?;

        let series = Series::try_from((asset_id.clone(), granularity, resp))
            .map_err(|e| self.client.report(FetchError::malformed(PRICE_HISTORY, e.to_string())))?;

        tracing::debug!(
            asset = %asset_id,
            granularity = %granularity,
            points = series.len(),
            "Price history loaded"
        );
        Ok(series)
    }
}
