//! The seam between the request coordinator and the provider.

use crate::domain::asset::Asset;
use crate::domain::price_history::Series;
use crate::error::FetchError;
use crate::shared::{AssetId, Granularity};
use std::num::NonZeroU32;

/// Anything that can list assets and fetch price history.
///
/// Implementations perform one provider round trip per call and own the
/// failure-notification contract: by the time an `Err` is returned, the user
/// has already been notified. [`CoinGeckoClient`](crate::client::CoinGeckoClient)
/// is the production implementation.
#[allow(async_fn_in_trait)]
pub trait PriceSource {
    async fn list_top_assets(&self, limit: NonZeroU32) -> Result<Vec<Asset>, FetchError>;

    async fn fetch_history(
        &self,
        asset_id: &AssetId,
        granularity: Granularity,
    ) -> Result<Series, FetchError>;
}

#[cfg(feature = "http")]
impl PriceSource for crate::client::CoinGeckoClient {
    async fn list_top_assets(&self, limit: NonZeroU32) -> Result<Vec<Asset>, FetchError> {
        self.assets().top(limit).await
    }

    async fn fetch_history(
        &self,
        asset_id: &AssetId,
        granularity: Granularity,
    ) -> Result<Series, FetchError> {
        self.price_history().get(asset_id, granularity).await
    }
}
