//! Immutable chart view-model.

use crate::domain::asset::{Asset, ChangeDirection};
use crate::domain::price_history::AlignedRow;
use crate::error::ErrorKind;
use crate::shared::fmt::{format_change, format_price, format_price_short, format_timestamp};
use crate::shared::{AssetId, Granularity};
use std::sync::Arc;

/// Everything a renderer needs to paint the chart and its header.
///
/// Rebuilt after every state transition; never mutated. Cloning is cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub rows: Arc<[AlignedRow]>,
    /// Any slot has a request in flight.
    pub loading: bool,
    /// Primary slot's failure if any, otherwise the secondary's.
    pub error: Option<ErrorKind>,
    pub granularity: Granularity,
    pub primary: Option<AssetSummary>,
    pub secondary: Option<AssetSummary>,
}

impl ViewModel {
    pub(crate) fn empty(granularity: Granularity) -> Self {
        Self {
            rows: Arc::from(Vec::new()),
            loading: false,
            error: None,
            granularity,
            primary: None,
            secondary: None,
        }
    }

    /// Whether any row carries a compare value, i.e. a second line is drawn.
    pub fn has_secondary_line(&self) -> bool {
        self.rows.iter().any(|r| r.secondary.is_some())
    }

    /// X-axis label for a row's timestamp.
    pub fn time_label(&self, row: &AlignedRow) -> String {
        format_timestamp(row.timestamp, self.granularity)
    }

    /// Y-axis tick label.
    pub fn price_label(&self, price: f64) -> String {
        format_price_short(price)
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        ViewModel::empty(Granularity::default())
    }
}

/// Header block for one selected asset.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetSummary {
    pub id: AssetId,
    /// `"Bitcoin (BTC)"`
    pub label: String,
    /// `"Bitcoin (USD)"`
    pub legend_label: String,
    pub price: String,
    pub change_24h: Option<String>,
    pub direction: Option<ChangeDirection>,
    pub icon_url: Option<String>,
}

impl From<&Asset> for AssetSummary {
    fn from(asset: &Asset) -> Self {
        Self {
            id: asset.id.clone(),
            label: asset.label(),
            legend_label: asset.legend_label(),
            price: format_price(asset.current_price),
            change_24h: asset.price_change_percentage_24h.map(format_change),
            direction: asset.change_direction(),
            icon_url: asset.icon_url.clone(),
        }
    }
}
