//! Request coordinator — per-slot fetch state, stale-response suppression,
//! and view-model derivation.
//!
//! [`RequestCoordinator`] performs no I/O. Selection changes return
//! [`FetchTicket`]s describing the fetches to run; results are handed back
//! through [`RequestCoordinator::complete`]. Every transition of a slot bumps
//! its sequence number, so a result is applied only when its ticket is the
//! latest one issued for that slot. [`ChartSession`] drives the coordinator
//! against a [`PriceSource`](crate::source::PriceSource).

pub mod session;
pub mod state;
pub mod view;

pub use session::{ChartSession, SessionConfig};
pub use state::{FetchTicket, RequestState, Slot};
pub use view::{AssetSummary, ViewModel};

use crate::domain::price_history::{align, AlignStrategy, Series, SeriesCache};
use crate::error::{ErrorKind, FetchError, SdkError};
use crate::shared::{AssetId, Granularity};
use state::SlotState;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct RequestCoordinator {
    granularity: Granularity,
    strategy: AlignStrategy,
    primary: SlotState,
    secondary: SlotState,
    cache: SeriesCache,
    view: ViewModel,
}

impl RequestCoordinator {
    pub fn new(granularity: Granularity, strategy: AlignStrategy) -> Self {
        Self {
            granularity,
            strategy,
            view: ViewModel::empty(granularity),
            ..Default::default()
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn asset(&self, slot: Slot) -> Option<&AssetId> {
        self.slot(slot).asset.as_ref()
    }

    pub fn state(&self, slot: Slot) -> &RequestState {
        &self.slot(slot).state
    }

    /// Latest sequence number issued for `slot`.
    pub fn seq(&self, slot: Slot) -> u64 {
        self.slot(slot).seq
    }

    pub fn cache(&self) -> &SeriesCache {
        &self.cache
    }

    /// Current view-model, without asset summaries.
    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    // ── Selection ────────────────────────────────────────────────────────

    /// Select the primary asset.
    ///
    /// Returns the fetch to run, or `None` when the series is cached or the
    /// selection is unchanged and already loading or loaded.
    pub fn set_primary(&mut self, asset_id: AssetId) -> Result<Option<FetchTicket>, SdkError> {
        if self.secondary.asset.as_ref() == Some(&asset_id) {
            return Err(SdkError::Validation(format!(
                "{asset_id} is already the compare asset"
            )));
        }
        Ok(self.select(Slot::Primary, Some(asset_id)))
    }

    /// Select the compare asset, or clear it with `None`.
    pub fn set_secondary(
        &mut self,
        asset_id: Option<AssetId>,
    ) -> Result<Option<FetchTicket>, SdkError> {
        if let Some(id) = &asset_id {
            if self.primary.asset.as_ref() == Some(id) {
                return Err(SdkError::Validation(format!(
                    "{id} is already the primary asset"
                )));
            }
        }
        Ok(self.select(Slot::Secondary, asset_id))
    }

    /// Drop the compare asset. Any in-flight secondary result is discarded
    /// when it lands.
    pub fn clear_secondary(&mut self) {
        self.select(Slot::Secondary, None);
    }

    /// Change the time window for both slots.
    ///
    /// Re-selecting the current window retries failed slots only.
    pub fn set_granularity(&mut self, granularity: Granularity) -> Vec<FetchTicket> {
        let slots: Vec<Slot> = if granularity == self.granularity {
            [Slot::Primary, Slot::Secondary]
                .into_iter()
                .filter(|s| {
                    let slot = self.slot(*s);
                    slot.asset.is_some() && slot.state.wants_retry()
                })
                .collect()
        } else {
            self.granularity = granularity;
            vec![Slot::Primary, Slot::Secondary]
        };

        let tickets = slots.into_iter().filter_map(|s| self.transition(s)).collect();
        self.rebuild_view();
        tickets
    }

    // ── Completion ───────────────────────────────────────────────────────

    /// Apply the outcome of a fetch.
    ///
    /// Returns the slot it was applied to, or [`FetchError::Superseded`] when a
    /// newer transition owns the slot. Superseded results leave both the slot
    /// and the cache untouched.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Series, FetchError>,
    ) -> Result<Slot, FetchError> {
        if ticket.seq != self.slot(ticket.slot).seq {
            tracing::debug!(
                slot = %ticket.slot,
                seq = ticket.seq,
                latest = self.slot(ticket.slot).seq,
                asset = %ticket.asset_id,
                "Discarding stale price history"
            );
            return Err(FetchError::Superseded);
        }

        let state = match result {
            Ok(series) => {
                let series = Arc::new(series);
                self.cache.put(
                    ticket.asset_id.clone(),
                    ticket.granularity,
                    Arc::clone(&series),
                );
                RequestState::Ready(series)
            }
            Err(err) => RequestState::Failed(err.kind()),
        };
        self.slot_mut(ticket.slot).state = state;
        self.rebuild_view();
        Ok(ticket.slot)
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn slot(&self, slot: Slot) -> &SlotState {
        match slot {
            Slot::Primary => &self.primary,
            Slot::Secondary => &self.secondary,
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut SlotState {
        match slot {
            Slot::Primary => &mut self.primary,
            Slot::Secondary => &mut self.secondary,
        }
    }

    fn select(&mut self, slot: Slot, asset_id: Option<AssetId>) -> Option<FetchTicket> {
        let current = self.slot(slot);
        if current.asset == asset_id && !current.state.wants_retry() {
            return None;
        }
        self.slot_mut(slot).asset = asset_id;
        let ticket = self.transition(slot);
        self.rebuild_view();
        ticket
    }

    /// Move `slot` to the state its selection calls for at the current
    /// granularity.
    fn transition(&mut self, slot: Slot) -> Option<FetchTicket> {
        let granularity = self.granularity;
        let asset = self.slot(slot).asset.clone();
        let cached = asset
            .as_ref()
            .and_then(|id| self.cache.get(id, granularity));

        let entry = self.slot_mut(slot);
        entry.seq += 1;
        let seq = entry.seq;

        match (asset, cached) {
            (None, _) => {
                entry.state = RequestState::Idle;
                None
            }
            (Some(_), Some(series)) => {
                entry.state = RequestState::Ready(series);
                None
            }
            (Some(asset_id), None) => {
                entry.state = RequestState::Loading;
                Some(FetchTicket {
                    slot,
                    seq,
                    asset_id,
                    granularity,
                })
            }
        }
    }

    fn rebuild_view(&mut self) {
        let primary = self.primary.state.series();
        let secondary = self.secondary.state.series();

        let rows = match (primary, secondary) {
            (Some(p), s) => self.strategy.align(p.points(), s.map(|s| s.points())),
            (None, Some(s)) => align::secondary_only(s.points()),
            (None, None) => Vec::new(),
        };

        self.view = ViewModel {
            rows: Arc::from(rows),
            loading: self.primary.state.is_loading() || self.secondary.state.is_loading(),
            error: self.first_error(),
            granularity: self.granularity,
            primary: None,
            secondary: None,
        };
    }

    fn first_error(&self) -> Option<ErrorKind> {
        self.primary
            .state
            .error()
            .or_else(|| self.secondary.state.error())
    }
}
