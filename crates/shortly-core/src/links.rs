// ── Link list controller ──
//
// Owns one paginated, filtered page of the user's links. Every change to
// `(page, filter)` issues a fetch; mutations are followed by an
// authoritative refetch instead of an optimistic local edit.
//
// A failed fetch keeps the last successful snapshot (stale-while-error).
// Responses from superseded fetches are dropped by the generation guard.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use url::Url;

use shortly_api::ApiClient;

use crate::error::CoreError;
use crate::generation::Generation;
use crate::model::{Link, LinkFilter, Page, TriState, expected_total_pages};
use crate::notice::Notifier;

/// What happened to a fetch once its response came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was applied to the controller state.
    Applied,
    /// A newer fetch was issued meanwhile; the response was dropped.
    Discarded,
    /// Nothing changed, so no fetch was issued.
    Unchanged,
}

/// Observable state of a [`LinkList`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkListState {
    pub items: Vec<Link>,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub filter: LinkFilter,
    pub is_loading: bool,
}

impl LinkListState {
    fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            page_size,
            total_pages: 1,
            total_items: 0,
            filter: LinkFilter::default(),
            is_loading: false,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Cheaply cloneable handle to the link list.
#[derive(Clone)]
pub struct LinkList {
    inner: Arc<LinkListInner>,
}

struct LinkListInner {
    client: Arc<ApiClient>,
    notifier: Notifier,
    state: watch::Sender<LinkListState>,
    generation: Generation,
}

impl LinkList {
    pub fn new(client: Arc<ApiClient>, notifier: Notifier, page_size: u32) -> Self {
        Self::from_state(client, notifier, LinkListState::new(page_size.max(1)))
    }

    /// A list that starts on `page` under `filter`. Nothing is fetched
    /// until the first `refresh`.
    pub fn with_view(
        client: Arc<ApiClient>,
        notifier: Notifier,
        page_size: u32,
        filter: LinkFilter,
        page: u32,
    ) -> Result<Self, CoreError> {
        if page == 0 {
            return Err(CoreError::validation("page", "pages start at 1"));
        }
        let state = LinkListState {
            page,
            filter,
            ..LinkListState::new(page_size.max(1))
        };
        Ok(Self::from_state(client, notifier, state))
    }

    fn from_state(client: Arc<ApiClient>, notifier: Notifier, state: LinkListState) -> Self {
        let (state, _) = watch::channel(state);
        Self {
            inner: Arc::new(LinkListInner {
                client,
                notifier,
                state,
                generation: Generation::default(),
            }),
        }
    }

    pub fn state(&self) -> LinkListState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LinkListState> {
        self.inner.state.subscribe()
    }

    // ── Fetching ─────────────────────────────────────────────────────

    /// Re-fetch the current page with the current filters.
    pub async fn refresh(&self) -> Result<FetchOutcome, CoreError> {
        self.fetch().await
    }

    pub async fn set_page(&self, page: u32) -> Result<FetchOutcome, CoreError> {
        if page == 0 {
            return Err(CoreError::validation("page", "pages start at 1"));
        }
        if !self.inner.state.send_if_modified(|s| replace_if_changed(&mut s.page, page)) {
            return Ok(FetchOutcome::Unchanged);
        }
        self.fetch().await
    }

    /// Advance one page; a no-op on the last page.
    pub async fn next_page(&self) -> Result<FetchOutcome, CoreError> {
        let moved = self.inner.state.send_if_modified(|s| {
            if !s.has_next() {
                return false;
            }
            s.page += 1;
            true
        });
        if !moved {
            return Ok(FetchOutcome::Unchanged);
        }
        self.fetch().await
    }

    /// Go back one page; a no-op on the first page.
    pub async fn prev_page(&self) -> Result<FetchOutcome, CoreError> {
        let moved = self.inner.state.send_if_modified(|s| {
            if !s.has_prev() {
                return false;
            }
            s.page -= 1;
            true
        });
        if !moved {
            return Ok(FetchOutcome::Unchanged);
        }
        self.fetch().await
    }

    // ── Filters ──────────────────────────────────────────────────────

    pub async fn set_active_filter(&self, value: TriState) -> Result<FetchOutcome, CoreError> {
        let filter = LinkFilter {
            is_active: value,
            ..self.inner.state.borrow().filter
        };
        self.set_filter(filter).await
    }

    pub async fn set_valid_filter(&self, value: TriState) -> Result<FetchOutcome, CoreError> {
        let filter = LinkFilter {
            is_valid: value,
            ..self.inner.state.borrow().filter
        };
        self.set_filter(filter).await
    }

    pub async fn reset_filters(&self) -> Result<FetchOutcome, CoreError> {
        self.set_filter(LinkFilter::default()).await
    }

    /// Replace both filter axes. Any change sends the list back to page 1.
    pub async fn set_filter(&self, filter: LinkFilter) -> Result<FetchOutcome, CoreError> {
        let changed = self.inner.state.send_if_modified(|s| {
            if s.filter == filter {
                return false;
            }
            s.filter = filter;
            s.page = 1;
            true
        });
        if !changed {
            return Ok(FetchOutcome::Unchanged);
        }
        debug!(?filter, "link filter changed");
        self.fetch().await
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Shorten `orig_url`, then jump to page 1 and refetch once.
    ///
    /// The URL is checked locally first; an invalid one never reaches the
    /// server. A failing refetch is reported on the notice channel but does
    /// not fail the create.
    pub async fn create(&self, orig_url: &str, expire_seconds: Option<u64>) -> Result<Link, CoreError> {
        let orig_url = orig_url.trim();
        if let Err(err) = validate_url(orig_url) {
            self.inner.notifier.error(&err);
            return Err(err);
        }

        let created = match self.inner.client.create_link(orig_url, expire_seconds).await {
            Ok(raw) => Link::from(raw),
            Err(e) => return Err(self.report(e.into())),
        };
        info!(short_id = %created.short_id, "link created");
        self.inner.notifier.success("Link created");

        self.inner.state.send_modify(|s| s.page = 1);
        self.refetch_after_mutation().await;
        Ok(created)
    }

    /// Deactivate a link, then refetch the current page.
    ///
    /// The page is kept even if it comes back empty.
    pub async fn deactivate(&self, short_id: &str) -> Result<Link, CoreError> {
        let deactivated = match self.inner.client.deactivate_link(short_id).await {
            Ok(raw) => Link::from(raw),
            Err(e) => return Err(self.report(e.into())),
        };
        info!(short_id, "link deactivated");
        self.inner.notifier.success("Link deactivated");

        self.refetch_after_mutation().await;
        Ok(deactivated)
    }

    // ── Internals ────────────────────────────────────────────────────

    async fn fetch(&self) -> Result<FetchOutcome, CoreError> {
        let ticket = self.inner.generation.advance();
        let query = {
            let s = self.inner.state.borrow();
            s.filter.query(s.page, s.page_size)
        };
        self.inner.state.send_modify(|s| s.is_loading = true);
        debug!(generation = ticket, page = query.page, "fetching links");

        let result = self.inner.client.list_links(&query).await;

        if !self.inner.generation.is_current(ticket) {
            debug!(generation = ticket, "discarding superseded link page");
            return Ok(FetchOutcome::Discarded);
        }

        match result {
            Ok(raw) => {
                let page = Page::<Link>::from(raw);
                let expected = expected_total_pages(page.total_items, query.page_size);
                if page.total_pages != expected {
                    warn!(
                        total_items = page.total_items,
                        total_pages = page.total_pages,
                        expected,
                        "server page count disagrees with page size"
                    );
                }
                self.inner.state.send_modify(|s| {
                    s.items = page.items;
                    s.total_items = page.total_items;
                    s.total_pages = page.total_pages;
                    s.is_loading = false;
                });
                debug!(
                    generation = ticket,
                    total_items = page.total_items,
                    total_pages = page.total_pages,
                    "link page applied"
                );
                Ok(FetchOutcome::Applied)
            }
            Err(e) => {
                self.inner.state.send_modify(|s| s.is_loading = false);
                Err(self.report(e.into()))
            }
        }
    }

    async fn refetch_after_mutation(&self) {
        if let Err(e) = self.fetch().await {
            warn!(error = %e, "refetch after mutation failed");
        }
    }

    fn report(&self, err: CoreError) -> CoreError {
        self.inner.notifier.error(&err);
        err
    }
}

/// Store `value` in `slot`, reporting whether it differed.
pub(crate) fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn validate_url(raw: &str) -> Result<(), CoreError> {
    if raw.is_empty() {
        return Err(CoreError::validation("url", "please enter a URL"));
    }
    Url::parse(raw)
        .map(|_| ())
        .map_err(|e| CoreError::validation("url", e.to_string()))
}
