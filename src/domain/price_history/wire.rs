//! Wire types for price history (REST).

use serde::{Deserialize, Serialize};

/// `GET /coins/{id}/market_chart` body.
///
/// Each entry of `prices` is a `[timestamp_ms, price]` pair, oldest first.
/// `market_caps` and `total_volumes` are also sent but not consumed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketChartResponse {
    pub prices: Vec<Vec<f64>>,
}
