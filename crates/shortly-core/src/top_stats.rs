// ── Top-N statistics controller ──
//
// Fetches the user's most-clicked links for a `(top, sort_by)` window.
// Ordering comes from the server; totals are summed locally over
// whatever window is loaded.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use shortly_api::ApiClient;

use crate::error::CoreError;
use crate::generation::Generation;
use crate::links::{FetchOutcome, replace_if_changed};
use crate::model::{SortBy, StatsRecord, StatsSummary, TopN};
use crate::notice::Notifier;

/// Observable state of [`TopStats`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopStatsState {
    pub items: Vec<StatsRecord>,
    pub summary: StatsSummary,
    pub top: TopN,
    pub sort_by: SortBy,
    pub is_loading: bool,
}

#[derive(Clone)]
pub struct TopStats {
    inner: Arc<TopStatsInner>,
}

struct TopStatsInner {
    client: Arc<ApiClient>,
    notifier: Notifier,
    state: watch::Sender<TopStatsState>,
    generation: Generation,
}

impl TopStats {
    pub fn new(client: Arc<ApiClient>, notifier: Notifier, top: TopN) -> Self {
        let (state, _) = watch::channel(TopStatsState {
            top,
            ..TopStatsState::default()
        });
        Self {
            inner: Arc::new(TopStatsInner {
                client,
                notifier,
                state,
                generation: Generation::default(),
            }),
        }
    }

    pub fn state(&self) -> TopStatsState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TopStatsState> {
        self.inner.state.subscribe()
    }

    pub fn summary(&self) -> StatsSummary {
        self.inner.state.borrow().summary
    }

    pub async fn refresh(&self) -> Result<FetchOutcome, CoreError> {
        self.fetch().await
    }

    pub async fn set_top(&self, top: TopN) -> Result<FetchOutcome, CoreError> {
        if !self.inner.state.send_if_modified(|s| replace_if_changed(&mut s.top, top)) {
            return Ok(FetchOutcome::Unchanged);
        }
        self.fetch().await
    }

    pub async fn set_sort_by(&self, sort_by: SortBy) -> Result<FetchOutcome, CoreError> {
        if !self
            .inner
            .state
            .send_if_modified(|s| replace_if_changed(&mut s.sort_by, sort_by))
        {
            return Ok(FetchOutcome::Unchanged);
        }
        self.fetch().await
    }

    /// Change both parameters with a single fetch.
    pub async fn set_window(&self, top: TopN, sort_by: SortBy) -> Result<FetchOutcome, CoreError> {
        let changed = self.inner.state.send_if_modified(|s| {
            let top_changed = replace_if_changed(&mut s.top, top);
            replace_if_changed(&mut s.sort_by, sort_by) || top_changed
        });
        if !changed {
            return Ok(FetchOutcome::Unchanged);
        }
        self.fetch().await
    }

    async fn fetch(&self) -> Result<FetchOutcome, CoreError> {
        let ticket = self.inner.generation.advance();
        let (top, sort_by) = {
            let s = self.inner.state.borrow();
            (s.top, s.sort_by)
        };
        self.inner.state.send_modify(|s| s.is_loading = true);
        debug!(generation = ticket, top = top.count(), %sort_by, "fetching top stats");

        let result = self.inner.client.top_stats(top.count(), sort_by).await;

        if !self.inner.generation.is_current(ticket) {
            debug!(generation = ticket, "discarding superseded top stats");
            return Ok(FetchOutcome::Discarded);
        }

        match result {
            Ok(raw) => {
                let items: Vec<StatsRecord> = raw.items.into_iter().map(StatsRecord::from).collect();
                let summary = StatsSummary::from_records(&items);
                self.inner.state.send_modify(|s| {
                    s.items = items;
                    s.summary = summary;
                    s.is_loading = false;
                });
                Ok(FetchOutcome::Applied)
            }
            Err(e) => {
                self.inner.state.send_modify(|s| s.is_loading = false);
                let err = CoreError::from(e);
                self.inner.notifier.error(&err);
                Err(err)
            }
        }
    }
}
