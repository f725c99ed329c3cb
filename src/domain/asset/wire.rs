//! Wire types for asset listings (REST).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One record of `GET /coins/markets`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoinMarketResponse {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    pub last_updated: Option<String>,
}

/// `GET /search/trending` envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendingResponse {
    pub coins: Vec<TrendingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendingEntry {
    pub item: TrendingItem,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendingItem {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
}

/// `GET /simple/price`: `{ "bitcoin": { "usd": 64250.0 } }`.
pub type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

/// `GET /ping`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PingResponse {
    pub gecko_says: String,
}
