//! `ChartSession` — drives a [`RequestCoordinator`] against a [`PriceSource`].
//!
//! Fetches run concurrently on the caller's executor through a
//! `FuturesUnordered` set; nothing is spawned. Superseded fetches are allowed
//! to finish and their results are dropped on arrival.

use super::{RequestCoordinator, Slot, ViewModel};
use super::state::FetchTicket;
use super::view::AssetSummary;
use crate::domain::asset::Asset;
use crate::domain::price_history::{AlignStrategy, Series};
use crate::error::{FetchError, SdkError};
use crate::shared::{AssetId, Granularity};
use crate::source::PriceSource;

use futures_util::future::LocalBoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use std::num::NonZeroU32;

const DEFAULT_TOP_ASSETS: u32 = 20;

/// Session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// How many assets to list, ranked by market cap.
    pub top_assets_limit: NonZeroU32,
    /// Initial time window.
    pub granularity: Granularity,
    pub align_strategy: AlignStrategy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            top_assets_limit: NonZeroU32::new(DEFAULT_TOP_ASSETS).unwrap_or(NonZeroU32::MIN),
            granularity: Granularity::default(),
            align_strategy: AlignStrategy::default(),
        }
    }
}

type InFlight = LocalBoxFuture<'static, (FetchTicket, Result<Series, FetchError>)>;

/// One comparison chart: the asset list, two selection slots, and the
/// fetches in flight for them.
pub struct ChartSession<S> {
    source: S,
    config: SessionConfig,
    coordinator: RequestCoordinator,
    assets: Vec<Asset>,
    in_flight: FuturesUnordered<InFlight>,
}

impl<S: PriceSource + Clone + 'static> ChartSession<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, SessionConfig::default())
    }

    pub fn with_config(source: S, config: SessionConfig) -> Self {
        Self {
            source,
            config,
            coordinator: RequestCoordinator::new(config.granularity, config.align_strategy),
            assets: Vec::new(),
            in_flight: FuturesUnordered::new(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn coordinator(&self) -> &RequestCoordinator {
        &self.coordinator
    }

    /// Fetches issued and not yet completed, superseded ones included.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    // ── Assets ───────────────────────────────────────────────────────────

    /// Fetch the ranked asset list, replacing the current snapshot.
    ///
    /// While no primary is selected, the highest-ranked asset that is not the
    /// compare asset becomes the primary selection. On failure the previous
    /// snapshot is kept.
    pub async fn load_assets(&mut self) -> Result<&[Asset], FetchError> {
        let assets = self
            .source
            .list_top_assets(self.config.top_assets_limit)
            .await?;
        tracing::debug!(count = assets.len(), "Loaded asset list");
        self.assets = assets;

        if self.coordinator.asset(Slot::Primary).is_none() {
            if let Some(id) = self.default_primary() {
                match self.coordinator.set_primary(id) {
                    Ok(ticket) => self.dispatch(ticket),
                    Err(e) => tracing::warn!("Default primary selection failed: {}", e),
                }
            }
        }
        Ok(&self.assets)
    }

    fn default_primary(&self) -> Option<AssetId> {
        let compare = self.coordinator.asset(Slot::Secondary);
        self.assets
            .iter()
            .map(|a| &a.id)
            .find(|id| Some(*id) != compare)
            .cloned()
    }

    pub fn asset(&self, id: &AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| &a.id == id)
    }

    // ── Selection ────────────────────────────────────────────────────────

    pub fn select_primary(&mut self, id: impl Into<AssetId>) -> Result<(), SdkError> {
        let ticket = self.coordinator.set_primary(id.into())?;
        self.dispatch(ticket);
        Ok(())
    }

    /// Select the compare asset, or clear it with `None`.
    pub fn select_secondary(&mut self, id: Option<AssetId>) -> Result<(), SdkError> {
        let ticket = self.coordinator.set_secondary(id)?;
        self.dispatch(ticket);
        Ok(())
    }

    pub fn clear_secondary(&mut self) {
        self.coordinator.clear_secondary();
    }

    pub fn select_granularity(&mut self, granularity: Granularity) {
        for ticket in self.coordinator.set_granularity(granularity) {
            self.dispatch(Some(ticket));
        }
    }

    // ── Driving ──────────────────────────────────────────────────────────

    /// Wait for the next fetch to finish and apply it.
    ///
    /// Returns `None` when nothing is in flight. Otherwise returns the slot the
    /// result was applied to, or [`FetchError::Superseded`] when it was stale.
    pub async fn next_completion(&mut self) -> Option<Result<Slot, FetchError>> {
        let (ticket, result) = self.in_flight.next().await?;
        Some(self.coordinator.complete(&ticket, result))
    }

    /// Drive every in-flight fetch to completion.
    pub async fn settle(&mut self) {
        while let Some(outcome) = self.next_completion().await {
            if let Ok(slot) = outcome {
                tracing::debug!(%slot, "Applied price history");
            }
        }
    }

    /// The view-model, with header summaries for the selected assets.
    pub fn view(&self) -> ViewModel {
        let mut view = self.coordinator.view().clone();
        view.primary = self.summary(Slot::Primary);
        view.secondary = self.summary(Slot::Secondary);
        view
    }

    fn summary(&self, slot: Slot) -> Option<AssetSummary> {
        let id = self.coordinator.asset(slot)?;
        self.asset(id).map(AssetSummary::from)
    }

    fn dispatch(&mut self, ticket: Option<FetchTicket>) {
        let Some(ticket) = ticket else { return };
        tracing::debug!(
            slot = %ticket.slot,
            seq = ticket.seq,
            asset = %ticket.asset_id,
            granularity = %ticket.granularity,
            "Fetching price history"
        );
        let source = self.source.clone();
        self.in_flight.push(Box::pin(async move {
            let result = source
                .fetch_history(&ticket.asset_id, ticket.granularity)
                .await;
            (ticket, result)
        }));
    }
}
