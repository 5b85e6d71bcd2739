//! Entity list page controller
//!
//! Owns the list state of one entity page: the URL query, the current
//! server page of records and its pagination metadata. Every change to
//! the query re-issues the fetch with the full parameter set; only the
//! newest response is applied.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

use super::{Debouncer, ListQuery, RequestSequencer, SortDir};
use crate::api::{ApiResult, Page, PaginationMeta};
use crate::config::ListConfig;
use crate::notify::Notifications;
use crate::routing::AdminRoute;

/// Where a list page gets its records
#[async_trait]
pub trait RecordSource: Send + Sync + 'static {
    type Record: Clone + Send + Sync + 'static;

    /// Route segment of the entity (`achievements`)
    fn base_path(&self) -> &str;

    /// Filters understood besides `status`
    fn filter_keys(&self) -> &'static [&'static str] {
        &[]
    }

    /// Fetch one page for the query
    async fn fetch(&self, query: &ListQuery) -> ApiResult<Page<Self::Record>>;
}

/// What happened to a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Records and metadata replaced
    Applied,
    /// Fetch failed; the page was emptied and an error toast shown
    Failed,
    /// A newer fetch started meanwhile; the response was dropped
    Stale,
}

/// Copy of the page state at one moment
#[derive(Debug, Clone)]
pub struct ListSnapshot<R> {
    pub query: ListQuery,
    pub records: Vec<R>,
    pub meta: PaginationMeta,
    pub loading: bool,
    pub last_error: Option<String>,
}

impl<R> ListSnapshot<R> {
    fn new(query: ListQuery) -> Self {
        let meta = PaginationMeta::empty(query.size);
        Self {
            query,
            records: Vec::new(),
            meta,
            loading: false,
            last_error: None,
        }
    }
}

/// List page for one entity
pub struct ListPage<S: RecordSource> {
    source: Arc<S>,
    state: Arc<Mutex<ListSnapshot<S::Record>>>,
    sequencer: Arc<RequestSequencer>,
    debouncer: Debouncer,
    notifications: Notifications,
}

impl<S: RecordSource> Clone for ListPage<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
            sequencer: Arc::clone(&self.sequencer),
            debouncer: self.debouncer.clone(),
            notifications: self.notifications.clone(),
        }
    }
}

impl<S: RecordSource> ListPage<S> {
    /// Page starting from an explicit query
    pub fn new(source: S, query: ListQuery) -> Self {
        Self {
            source: Arc::new(source),
            state: Arc::new(Mutex::new(ListSnapshot::new(query))),
            sequencer: Arc::new(RequestSequencer::new()),
            debouncer: Debouncer::from_millis(ListConfig::default().search_debounce_ms),
            notifications: Notifications::new(),
        }
    }

    /// Page restored from a URL query string; unknown filters are dropped
    pub fn from_url(source: S, query_string: &str, config: &ListConfig) -> Self {
        let mut query = ListQuery::from_query_string_or(query_string, config.default_page_size);
        let mut allowed = vec!["status"];
        allowed.extend_from_slice(source.filter_keys());
        query.retain_filters(&allowed);

        Self::new(source, query)
            .with_debouncer(Debouncer::from_millis(config.search_debounce_ms))
    }

    /// Builder: report into a shared notification queue
    pub fn with_notifications(mut self, notifications: Notifications) -> Self {
        self.notifications = notifications;
        self
    }

    pub fn with_debouncer(mut self, debouncer: Debouncer) -> Self {
        self.debouncer = debouncer;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut ListSnapshot<S::Record>) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    pub fn snapshot(&self) -> ListSnapshot<S::Record> {
        self.with_state(|state| state.clone())
    }

    pub fn query(&self) -> ListQuery {
        self.with_state(|state| state.query.clone())
    }

    pub fn records(&self) -> Vec<S::Record> {
        self.with_state(|state| state.records.clone())
    }

    pub fn meta(&self) -> PaginationMeta {
        self.with_state(|state| state.meta)
    }

    /// Shareable URL of the current state
    pub fn current_url(&self) -> String {
        AdminRoute::List {
            entity: self.source.base_path().to_string(),
            query: self.query(),
        }
        .to_string()
    }

    /// Fetch with the current query
    pub async fn load(&self) -> LoadOutcome {
        let (ticket, query) = self.with_state(|state| {
            state.loading = true;
            (self.sequencer.issue(), state.query.clone())
        });

        let result = self.source.fetch(&query).await;

        if !self.sequencer.is_current(ticket) {
            tracing::debug!(
                entity = self.source.base_path(),
                ?ticket,
                "Discarding stale list response"
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(page) => {
                self.with_state(|state| {
                    state.meta = PaginationMeta::from_page(&page, &query);
                    state.records = page.content;
                    state.loading = false;
                    state.last_error = None;
                });
                LoadOutcome::Applied
            }
            Err(e) => {
                let message = e.user_message();
                tracing::warn!(
                    entity = self.source.base_path(),
                    error = %e,
                    "List fetch failed"
                );
                self.with_state(|state| {
                    state.records.clear();
                    state.meta = PaginationMeta::empty(query.size);
                    state.loading = false;
                    state.last_error = Some(message.clone());
                });
                self.notifications.error(message);
                LoadOutcome::Failed
            }
        }
    }

    /// Apply a query change, then refetch
    async fn update(&self, change: impl FnOnce(&mut ListQuery)) -> LoadOutcome {
        self.with_state(|state| change(&mut state.query));
        self.load().await
    }

    pub async fn set_page(&self, page: u32) -> LoadOutcome {
        self.update(|query| query.set_page(page)).await
    }

    pub async fn next_page(&self) -> LoadOutcome {
        let meta = self.meta();
        let page = if meta.has_next() {
            meta.current_page + 1
        } else {
            meta.current_page
        };
        self.set_page(page).await
    }

    pub async fn previous_page(&self) -> LoadOutcome {
        let page = self.meta().current_page.saturating_sub(1);
        self.set_page(page).await
    }

    pub async fn set_size(&self, size: u32) -> LoadOutcome {
        self.update(|query| query.set_size(size)).await
    }

    pub async fn set_sort(&self, sort_by: &str, sort_dir: Option<SortDir>) -> LoadOutcome {
        self.update(|query| query.set_sort(sort_by, sort_dir)).await
    }

    pub async fn set_filter(&self, key: &str, value: &str) -> LoadOutcome {
        self.update(|query| query.set_filter(key, value)).await
    }

    /// Search right away
    pub async fn set_search(&self, search: &str) -> LoadOutcome {
        self.update(|query| query.set_search(search)).await
    }

    /// Search once typing pauses. `None` when a later keystroke took over.
    pub async fn search_debounced(&self, search: &str) -> Option<LoadOutcome> {
        let search = search.to_string();
        self.debouncer
            .run(|| async move { self.set_search(&search).await })
            .await
    }
}
