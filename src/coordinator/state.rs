//! Per-slot request state.

use crate::domain::price_history::Series;
use crate::error::ErrorKind;
use crate::shared::{AssetId, Granularity};
use std::sync::Arc;

/// One of the two independent fetch tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The selected asset; defines the chart's timeline.
    Primary,
    /// The optional compare asset.
    Secondary,
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Primary => write!(f, "primary"),
            Slot::Secondary => write!(f, "secondary"),
        }
    }
}

/// Lifecycle of a slot's series.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Ready(Arc<Series>),
    Failed(ErrorKind),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn series(&self) -> Option<&Arc<Series>> {
        match self {
            RequestState::Ready(series) => Some(series),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<ErrorKind> {
        match self {
            RequestState::Failed(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Whether selecting the same asset again should issue a new request.
    pub(crate) fn wants_retry(&self) -> bool {
        matches!(self, RequestState::Idle | RequestState::Failed(_))
    }
}

/// Selection, state and latest sequence number of one slot.
#[derive(Debug, Clone, Default)]
pub(crate) struct SlotState {
    pub(crate) asset: Option<AssetId>,
    pub(crate) state: RequestState,
    pub(crate) seq: u64,
}

/// A fetch the coordinator wants performed.
///
/// Hand it back to [`RequestCoordinator::complete`](super::RequestCoordinator::complete)
/// together with the result. Only the ticket carrying the slot's latest
/// sequence number is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub slot: Slot,
    pub seq: u64,
    pub asset_id: AssetId,
    pub granularity: Granularity,
}
