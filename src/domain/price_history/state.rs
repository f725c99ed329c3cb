//! Series cache — session-lifetime memo of fetched history.

use super::Series;
use crate::shared::{AssetId, Granularity};
use std::collections::HashMap;
use std::sync::Arc;

/// Fetched series keyed by asset and window.
///
/// Unbounded and never expires on its own: both the asset universe and the
/// window set are small, and cached history is treated as immutable for the
/// session. The app (or the coordinator) owns the instance.
#[derive(Debug, Clone, Default)]
pub struct SeriesCache {
    data: HashMap<(AssetId, Granularity), Arc<Series>>,
}

impl SeriesCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a series, replacing any earlier entry for the same key.
    pub fn put(&mut self, asset_id: AssetId, granularity: Granularity, series: Arc<Series>) {
        self.data.insert((asset_id, granularity), series);
    }

    pub fn get(&self, asset_id: &AssetId, granularity: Granularity) -> Option<Arc<Series>> {
        self.data.get(&(asset_id.clone(), granularity)).cloned()
    }

    pub fn contains(&self, asset_id: &AssetId, granularity: Granularity) -> bool {
        self.data.contains_key(&(asset_id.clone(), granularity))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}
