//! Asset domain — ranked asset snapshots and trending coins.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::AssetId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Asset ───────────────────────────────────────────────────────────────────

/// Market snapshot of one tradable asset.
///
/// Replaced wholesale on every refresh, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    pub symbol: String,
    pub current_price: f64,
    pub price_change_percentage_24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub total_volume: Option<f64>,
    pub icon_url: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl Asset {
    /// Ticker in upper case (`"BTC"`); the provider sends lower case.
    pub fn display_symbol(&self) -> String {
        self.symbol.to_uppercase()
    }

    /// Selector label: `"Bitcoin (BTC)"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.display_symbol())
    }

    /// Chart legend label: `"Bitcoin (USD)"`.
    pub fn legend_label(&self) -> String {
        format!("{} (USD)", self.name)
    }

    pub fn change_direction(&self) -> Option<ChangeDirection> {
        self.price_change_percentage_24h.map(ChangeDirection::of)
    }
}

/// Sign of a 24h change, for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeDirection {
    Up,
    Down,
}

impl ChangeDirection {
    /// Zero counts as up.
    pub fn of(percent: f64) -> Self {
        if percent >= 0.0 {
            ChangeDirection::Up
        } else {
            ChangeDirection::Down
        }
    }
}

// ─── TrendingCoin ────────────────────────────────────────────────────────────

/// Entry of the provider's trending list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingCoin {
    pub id: AssetId,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<u32>,
    pub thumb: Option<String>,
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum AssetValidationError {
    MissingId,
    MissingName(String),
    MissingSymbol(String),
    MissingPrice(String),
    MissingLastUpdated(String),
    InvalidLastUpdated { id: String, value: String },
}

impl fmt::Display for AssetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetValidationError::MissingId => write!(f, "Missing id"),
            AssetValidationError::MissingName(id) => write!(f, "Missing name ({id})"),
            AssetValidationError::MissingSymbol(id) => write!(f, "Missing symbol ({id})"),
            AssetValidationError::MissingPrice(id) => write!(f, "Missing current price ({id})"),
            AssetValidationError::MissingLastUpdated(id) => {
                write!(f, "Missing last_updated ({id})")
            }
            AssetValidationError::InvalidLastUpdated { id, value } => {
                write!(f, "Invalid last_updated {value:?} ({id})")
            }
        }
    }
}

impl std::error::Error for AssetValidationError {}
