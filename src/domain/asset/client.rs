//! Assets sub-client — ranked listings, trending coins, spot prices.

use crate::client::CoinGeckoClient;
use crate::domain::asset::{Asset, AssetValidationError, TrendingCoin};
use crate::error::FetchError;
use crate::network::VS_CURRENCY;
use crate::shared::AssetId;
use std::num::NonZeroU32;

const TOP_ASSETS: &str = "top assets";
const TRENDING: &str = "trending coins";
const PRICE: &str = "price";

/// Sub-client for asset operations.
pub struct Assets<'a> {
    pub(crate) client: &'a CoinGeckoClient,
}

impl<'a> Assets<'a> {
    /// The `limit` highest-ranked assets by market capitalization, in rank
    /// order.
    pub async fn top(&self, limit: NonZeroU32) -> Result<Vec<Asset>, FetchError> {
        let records = self
            .client
            .http
            .get_markets(limit.get())
            .await
            .map_err(|e| self.client.report(FetchError::from_http(TOP_ASSETS, &e)))?;

        records
            .into_iter()
            .map(Asset::try_from)
            .collect::<Result<Vec<_>, AssetValidationError>>()
            .map_err(|e| self.client.report(FetchError::malformed(TOP_ASSETS, e.to_string())))
    }

    /// The provider's trending list.
    pub async fn trending(&self) -> Result<Vec<TrendingCoin>, FetchError> {
        let resp = self
            .client
            .http
            .get_trending()
            .await
            .map_err(|e| self.client.report(FetchError::from_http(TRENDING, &e)))?;
        Ok(resp.coins.into_iter().map(|entry| entry.item.into()).collect())
    }

    /// Current USD price of one asset; `None` when the provider does not know
    /// the id.
    pub async fn simple_price(&self, asset_id: &AssetId) -> Result<Option<f64>, FetchError> {
        let resp = self
            .client
            .http
            .get_simple_price(asset_id)
            .await
            .map_err(|e| self.client.report(FetchError::from_http(PRICE, &e)))?;
        Ok(resp
            .get(asset_id.as_str())
            .and_then(|quotes| quotes.get(VS_CURRENCY))
            .copied())
    }

    /// Connectivity probe. Never notifies; failures are only logged.
    pub async fn ping(&self) -> bool {
        match self.client.http.ping().await {
            Ok(resp) => {
                tracing::debug!(reply = %resp.gecko_says, "Provider ping ok");
                true
            }
            Err(e) => {
                tracing::warn!("Provider ping failed: {}", e);
                false
            }
        }
    }
}
