//! Conversions from wire types to domain types for assets.

use super::wire::{CoinMarketResponse, TrendingItem};
use super::{Asset, AssetValidationError, TrendingCoin};
use crate::shared::AssetId;
use chrono::{DateTime, Utc};

impl TryFrom<CoinMarketResponse> for Asset {
    type Error = AssetValidationError;

    fn try_from(source: CoinMarketResponse) -> Result<Self, Self::Error> {
        if source.id.trim().is_empty() {
            return Err(AssetValidationError::MissingId);
        }
        if source.name.trim().is_empty() {
            return Err(AssetValidationError::MissingName(source.id));
        }
        if source.symbol.trim().is_empty() {
            return Err(AssetValidationError::MissingSymbol(source.id));
        }
        let Some(current_price) = source.current_price else {
            return Err(AssetValidationError::MissingPrice(source.id));
        };
        let Some(raw_updated) = source.last_updated else {
            return Err(AssetValidationError::MissingLastUpdated(source.id));
        };
        let last_updated = raw_updated.parse::<DateTime<Utc>>().map_err(|_| {
            AssetValidationError::InvalidLastUpdated {
                id: source.id.clone(),
                value: raw_updated.clone(),
            }
        })?;

        Ok(Self {
            id: AssetId::new(source.id),
            name: source.name,
            symbol: source.symbol,
            current_price,
            price_change_percentage_24h: source.price_change_percentage_24h,
            market_cap: source.market_cap,
            market_cap_rank: source.market_cap_rank,
            total_volume: source.total_volume,
            icon_url: source.image,
            last_updated,
        })
    }
}

impl From<TrendingItem> for TrendingCoin {
    fn from(item: TrendingItem) -> Self {
        Self {
            id: AssetId::new(item.id),
            name: item.name,
            symbol: item.symbol,
            market_cap_rank: item.market_cap_rank,
            thumb: item.thumb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::wire::TrendingResponse;

    fn sample_market_json() -> &'static str {
        r#"{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
            "current_price": 64250.12,
            "market_cap": 1265000000000,
            "market_cap_rank": 1,
            "total_volume": 31000000000,
            "price_change_percentage_24h": -1.25,
            "last_updated": "2024-03-01T12:34:56.789Z"
        }"#
    }

    #[test]
    fn test_market_response_conversion() {
        let wire: CoinMarketResponse = serde_json::from_str(sample_market_json()).unwrap();
        let asset = Asset::try_from(wire).unwrap();
        assert_eq!(asset.id.as_str(), "bitcoin");
        assert_eq!(asset.symbol, "btc");
        assert_eq!(asset.current_price, 64250.12);
        assert_eq!(asset.price_change_percentage_24h, Some(-1.25));
        assert_eq!(asset.market_cap_rank, Some(1));
        assert!(asset.icon_url.is_some());
        assert_eq!(asset.last_updated.timestamp(), 1_709_296_496);
    }

    #[test]
    fn test_null_change_is_kept_absent() {
        let mut wire: CoinMarketResponse = serde_json::from_str(sample_market_json()).unwrap();
        wire.price_change_percentage_24h = None;
        let asset = Asset::try_from(wire).unwrap();
        assert_eq!(asset.price_change_percentage_24h, None);
    }

    #[test]
    fn test_missing_price_is_rejected() {
        let mut wire: CoinMarketResponse = serde_json::from_str(sample_market_json()).unwrap();
        wire.current_price = None;
        let err = Asset::try_from(wire).unwrap_err();
        assert!(matches!(err, AssetValidationError::MissingPrice(id) if id == "bitcoin"));
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let mut wire: CoinMarketResponse = serde_json::from_str(sample_market_json()).unwrap();
        wire.last_updated = Some("yesterday".to_string());
        let err = Asset::try_from(wire).unwrap_err();
        assert!(matches!(err, AssetValidationError::InvalidLastUpdated { .. }));
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let mut wire: CoinMarketResponse = serde_json::from_str(sample_market_json()).unwrap();
        wire.id = String::new();
        assert!(matches!(
            Asset::try_from(wire),
            Err(AssetValidationError::MissingId)
        ));
    }

    #[test]
    fn test_trending_conversion() {
        let json = r#"{"coins":[{"item":{"id":"pepe","coin_id":24478,"name":"Pepe","symbol":"PEPE","market_cap_rank":31,"thumb":"https://example.invalid/pepe.png","score":0}}]}"#;
        let resp: TrendingResponse = serde_json::from_str(json).unwrap();
        let coins: Vec<TrendingCoin> = resp.coins.into_iter().map(|e| e.item.into()).collect();
        assert_eq!(coins.len(), 1);
        assert_eq!(coins[0].id.as_str(), "pepe");
        assert_eq!(coins[0].market_cap_rank, Some(31));
    }
}
