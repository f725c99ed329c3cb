//! Price history domain — series, cache, alignment.

pub mod align;
#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::shared::{AssetId, Granularity};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use align::{AlignStrategy, AlignedRow};
pub use state::SeriesCache;

/// A single sample on a price chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    /// USD price.
    pub price: f64,
}

/// One asset's price history at one window, in provider order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub asset_id: AssetId,
    pub granularity: Granularity,
    pub points: Vec<PricePoint>,
}

impl Series {
    pub fn new(asset_id: AssetId, granularity: Granularity, points: Vec<PricePoint>) -> Self {
        Self {
            asset_id,
            granularity,
            points,
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug)]
pub enum SeriesValidationError {
    MalformedPoint { index: usize, len: usize },
    InvalidTimestamp { index: usize },
}

impl fmt::Display for SeriesValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesValidationError::MalformedPoint { index, len } => {
                write!(f, "Point {index} has {len} values, expected [timestamp, price]")
            }
            SeriesValidationError::InvalidTimestamp { index } => {
                write!(f, "Point {index} has a non-finite timestamp")
            }
        }
    }
}

impl std::error::Error for SeriesValidationError {}
