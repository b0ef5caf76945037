// ── Per-link statistics on demand ──
//
// A single slot: opening a link's detail fetches its stats, closing the
// slot clears it. Both bump the generation, so a late answer for a
// superseded or closed detail is dropped.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use shortly_api::ApiClient;

use crate::error::CoreError;
use crate::generation::Generation;
use crate::links::FetchOutcome;
use crate::model::StatsRecord;
use crate::notice::Notifier;

/// Observable state of a [`LinkDetail`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailState {
    /// The link most recently opened, `None` when closed.
    pub short_id: Option<String>,
    /// Last stats record received for `short_id`.
    pub stats: Option<StatsRecord>,
    pub is_loading: bool,
}

impl DetailState {
    pub fn is_open(&self) -> bool {
        self.short_id.is_some()
    }
}

#[derive(Clone)]
pub struct LinkDetail {
    inner: Arc<LinkDetailInner>,
}

struct LinkDetailInner {
    client: Arc<ApiClient>,
    notifier: Notifier,
    state: watch::Sender<DetailState>,
    generation: Generation,
}

impl LinkDetail {
    pub fn new(client: Arc<ApiClient>, notifier: Notifier) -> Self {
        let (state, _) = watch::channel(DetailState::default());
        Self {
            inner: Arc::new(LinkDetailInner {
                client,
                notifier,
                state,
                generation: Generation::default(),
            }),
        }
    }

    pub fn state(&self) -> DetailState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.inner.state.subscribe()
    }

    /// Open the detail for `short_id` and fetch its stats.
    ///
    /// Stats already shown for a different link are cleared right away.
    /// If the fetch fails, the stats for this link (if any) are kept.
    pub async fn open(&self, short_id: &str) -> Result<FetchOutcome, CoreError> {
        let ticket = self.inner.generation.advance();
        self.inner.state.send_modify(|s| {
            if s.short_id.as_deref() != Some(short_id) {
                s.stats = None;
            }
            s.short_id = Some(short_id.to_owned());
            s.is_loading = true;
        });
        debug!(generation = ticket, short_id, "fetching link stats");

        let result = self.inner.client.link_stats(short_id).await;

        if !self.inner.generation.is_current(ticket) {
            debug!(generation = ticket, short_id, "discarding stale link stats");
            return Ok(FetchOutcome::Discarded);
        }

        match result {
            Ok(raw) => {
                let record = StatsRecord::from(raw);
                self.inner.state.send_modify(|s| {
                    s.stats = Some(record);
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

    /// Clear the slot. An in-flight fetch is abandoned.
    pub fn close(&self) {
        self.inner.generation.advance();
        self.inner.state.send_replace(DetailState::default());
    }
}
