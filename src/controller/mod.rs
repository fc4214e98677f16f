//! List-resource synchronization controller.
//!
//! A [`ResourceController`] keeps one page of a remote collection in sync with
//! the query a list view is showing (search text, category filter, page). It
//! owns the fetch lifecycle and reconciles optimistic edits with refetches;
//! rendering is left to whoever subscribes to its revision counter.
//!
//! # Ordering
//!
//! Every trigger bumps a generation counter before any request goes out. A
//! response is applied only if its generation is still the current one, so a
//! slow response can never overwrite the result of a later request.
//!
//! # Debounce
//!
//! [`ResourceController::set_search`] waits for a quiet period before
//! fetching. Every other trigger fetches immediately and cancels a pending
//! search timer.
//!
//! # Optimistic mutations
//!
//! Local effects of mutations whose remote call is still in flight are
//! re-applied on top of every reconciled page. A failed mutation is rolled
//! back by rebuilding the visible rows without its effect.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::models::config::ClientConfig;
use crate::pagination::{Page, total_pages};
use crate::query::{DEFAULT_PAGE_SIZE, QueryState};
use crate::transport::Transport;
use crate::transport::errors::TransportResult;

mod debounce;
mod mutation;

pub use debounce::DebounceTimer;
pub use mutation::LocalEffect;
use mutation::{MutationId, PendingMutations};

/// Default quiet period before a search fetch is issued.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Error,
}

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken {
    generation: u64,
}

impl RequestToken {
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// What happened to the response of a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page replaced the visible rows.
    Applied,
    /// The fetch failed; previous rows were kept and the error recorded.
    Failed,
    /// A newer fetch was issued meanwhile and the response was dropped.
    Stale,
}

/// Visible state of a list view.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState<T> {
    pub query: QueryState,
    pub items: Vec<T>,
    pub total: usize,
    pub status: Status,
    pub error_message: Option<String>,
    pub current_generation: u64,
}

impl<T> ControllerState<T> {
    fn new(query: QueryState) -> Self {
        Self {
            query,
            items: Vec::new(),
            total: 0,
            status: Status::Idle,
            error_message: None,
            current_generation: 0,
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.query.page_size)
    }
}

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub page_size: usize,
    pub search_debounce: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }
}

impl From<&ClientConfig> for ControllerOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            page_size: config.page_size,
            search_debounce: config.search_debounce(),
        }
    }
}

/// Handle to an immediately issued fetch.
#[derive(Debug)]
pub struct FetchHandle {
    token: RequestToken,
    handle: JoinHandle<FetchOutcome>,
}

impl FetchHandle {
    pub fn token(&self) -> RequestToken {
        self.token
    }

    /// Waits until the response has been reconciled or discarded.
    pub async fn settled(self) -> FetchOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(err) => {
                log::debug!("Fetch {} did not complete: {err}", self.token.generation);
                FetchOutcome::Stale
            }
        }
    }
}

struct Synced<T> {
    view: ControllerState<T>,
    /// Rows of the last reconciled page with committed mutations folded in.
    confirmed: Vec<T>,
    pending: PendingMutations<T>,
}

impl<T: Clone> Synced<T> {
    fn next_token(&mut self) -> RequestToken {
        self.view.current_generation += 1;
        RequestToken {
            generation: self.view.current_generation,
        }
    }

    fn is_current(&self, token: RequestToken) -> bool {
        self.view.current_generation == token.generation
    }

    fn rebuild_items(&mut self) {
        let mut items = self.confirmed.clone();
        self.pending.apply_all(&mut items);
        self.view.items = items;
    }
}

/// Result of reconciling one response.
enum Reconciled {
    Done(FetchOutcome),
    /// The requested page is past the end of the list; fetch this query instead.
    Refetch(RequestToken, QueryState),
}

struct Shared<T, R> {
    transport: R,
    state: Mutex<Synced<T>>,
    revision: watch::Sender<u64>,
}

impl<T, R> Shared<T, R> {
    fn lock(&self) -> MutexGuard<'_, Synced<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}

impl<T, R> Shared<T, R>
where
    T: Clone + Send + Sync + 'static,
    R: Transport<T> + 'static,
{
    /// Moves a debounced request into flight if nothing superseded it.
    fn begin(&self, token: RequestToken) -> Option<QueryState> {
        let query = {
            let mut synced = self.lock();
            if !synced.is_current(token) {
                return None;
            }
            synced.view.status = Status::Loading;
            synced.view.query.clone()
        };
        self.notify();
        Some(query)
    }

    async fn fetch(&self, mut token: RequestToken, mut query: QueryState) -> FetchOutcome {
        loop {
            let result = self.transport.fetch_page(&query).await;
            match self.reconcile(token, result) {
                Reconciled::Done(outcome) => return outcome,
                Reconciled::Refetch(next, next_query) => {
                    token = next;
                    query = next_query;
                }
            }
        }
    }

    fn reconcile(&self, token: RequestToken, result: TransportResult<Page<T>>) -> Reconciled {
        let outcome = {
            let mut synced = self.lock();
            if !synced.is_current(token) {
                log::debug!(
                    "Discarding response of fetch {}, current is {}",
                    token.generation,
                    synced.view.current_generation
                );
                return Reconciled::Done(FetchOutcome::Stale);
            }

            match result {
                Ok(page) => {
                    let last_page = total_pages(page.total, synced.view.query.page_size);
                    if synced.view.query.page > last_page {
                        // The list shrank while the page was requested.
                        log::debug!(
                            "Page {} is past the last page {last_page}, refetching",
                            synced.view.query.page
                        );
                        synced.view.query.page = last_page;
                        synced.view.total = page.total;
                        let next = synced.next_token();
                        Reconciled::Refetch(next, synced.view.query.clone())
                    } else {
                        synced.confirmed = page.items;
                        synced.view.total = page.total;
                        synced.rebuild_items();
                        synced.view.status = Status::Idle;
                        synced.view.error_message = None;
                        Reconciled::Done(FetchOutcome::Applied)
                    }
                }
                Err(err) => {
                    log::error!("Failed to fetch page {}: {err}", synced.view.query.page);
                    synced.view.status = Status::Error;
                    synced.view.error_message = Some(err.to_string());
                    Reconciled::Done(FetchOutcome::Failed)
                }
            }
        };
        self.notify();
        outcome
    }
}

/// Withdraws the local effect of a mutation whose future was dropped before
/// the remote call settled.
struct PendingGuard<'a, T: Clone, R> {
    shared: &'a Shared<T, R>,
    id: Option<MutationId>,
}

impl<T: Clone, R> PendingGuard<'_, T, R> {
    fn settle(&mut self) -> Option<MutationId> {
        self.id.take()
    }
}

impl<T: Clone, R> Drop for PendingGuard<'_, T, R> {
    fn drop(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };

        {
            let mut synced = self.shared.lock();
            if synced.pending.remove(id).is_some() {
                log::debug!("Optimistic update abandoned before the remote call settled");
                synced.rebuild_items();
            }
        }
        self.shared.notify();
    }
}

/// Keeps one page of a remote collection in sync with a list view.
///
/// Triggers spawn onto the ambient tokio runtime, so they must be called from
/// within one. Dropping the controller cancels a pending search timer; fetches
/// already in flight finish against state nobody observes anymore.
pub struct ResourceController<T, R> {
    shared: Arc<Shared<T, R>>,
    debounce: DebounceTimer,
}

impl<T, R> ResourceController<T, R>
where
    T: Clone + Send + Sync + 'static,
    R: Transport<T> + 'static,
{
    /// Creates a controller showing the first page with no filters.
    ///
    /// Nothing is fetched until the first trigger, usually [`Self::refresh`].
    pub fn new(transport: R, options: ControllerOptions) -> Self {
        let query = QueryState::new(options.page_size);
        Self::with_query(transport, query, options)
    }

    /// Creates a controller starting from `query`.
    ///
    /// The page size of `options` wins over the one carried by `query`.
    pub fn with_query(transport: R, mut query: QueryState, options: ControllerOptions) -> Self {
        assert!(options.page_size > 0, "page size must be greater than zero");
        query.page_size = options.page_size;
        query.page = query.page.max(1);

        let (revision, _) = watch::channel(0);
        let shared = Shared {
            transport,
            state: Mutex::new(Synced {
                view: ControllerState::new(query),
                confirmed: Vec::new(),
                pending: PendingMutations::default(),
            }),
            revision,
        };

        Self {
            shared: Arc::new(shared),
            debounce: DebounceTimer::new(options.search_debounce),
        }
    }

    /// Updates the search text and fetches once typing pauses.
    ///
    /// The page goes back to 1 right away; the status only turns to
    /// [`Status::Loading`] once the request is actually issued.
    pub fn set_search(&self, text: impl Into<String>) -> RequestToken {
        let text = text.into();
        let token = {
            let mut synced = self.shared.lock();
            synced.view.query.set_search(text);
            synced.next_token()
        };
        self.shared.notify();

        let shared = Arc::clone(&self.shared);
        self.debounce.schedule(async move {
            if let Some(query) = shared.begin(token) {
                shared.fetch(token, query).await;
            }
        });

        token
    }

    /// Switches the category filter and fetches the first page immediately.
    pub fn set_filter(&self, category: impl Into<String>) -> FetchHandle {
        let category = category.into();
        self.trigger(|query| query.set_category(category))
    }

    /// Moves to page `page`.
    ///
    /// Pages outside `1..=total_pages` are ignored and `None` is returned. The
    /// range follows the last applied page; if the list has shrunk by the time
    /// the response arrives, the last existing page is fetched instead.
    pub fn set_page(&self, page: usize) -> Option<FetchHandle> {
        let in_range = {
            let synced = self.shared.lock();
            (1..=synced.view.total_pages()).contains(&page)
        };
        if !in_range {
            log::debug!("Ignoring out of range page {page}");
            return None;
        }

        Some(self.trigger(|query| query.page = page))
    }

    /// Re-fetches the current query unchanged.
    pub fn refresh(&self) -> FetchHandle {
        self.trigger(|_| {})
    }

    /// Applies `local_update` right away and keeps it if `remote` succeeds.
    ///
    /// On failure the rows are rebuilt without the update, the status becomes
    /// [`Status::Error`] and the error is returned. On success nothing is
    /// refetched; call [`Self::refresh`] to pull server truth. Dropping the
    /// returned future before it completes withdraws the local update.
    pub async fn mutate_optimistic<F, Fut, O>(&self, local_update: F, remote: Fut) -> TransportResult<O>
    where
        F: Fn(&mut Vec<T>) + Send + Sync + 'static,
        Fut: Future<Output = TransportResult<O>>,
    {
        let id = {
            let mut synced = self.shared.lock();
            local_update(&mut synced.view.items);
            synced.pending.push(Box::new(local_update))
        };
        self.shared.notify();

        let mut guard = PendingGuard {
            shared: &*self.shared,
            id: Some(id),
        };
        let result = remote.await;
        let id = guard.settle();

        {
            let mut synced = self.shared.lock();
            let effect = id.and_then(|id| synced.pending.remove(id));
            match &result {
                Ok(_) => {
                    if let Some(effect) = effect {
                        effect(&mut synced.confirmed);
                    }
                }
                Err(err) => {
                    log::warn!("Rolling back optimistic update: {err}");
                    synced.rebuild_items();
                    synced.view.status = Status::Error;
                    synced.view.error_message = Some(err.to_string());
                }
            }
        }
        self.shared.notify();

        result
    }

    fn trigger(&self, update: impl FnOnce(&mut QueryState)) -> FetchHandle {
        if self.debounce.cancel() {
            log::debug!("Cancelled pending search fetch");
        }

        let (token, query) = {
            let mut synced = self.shared.lock();
            update(&mut synced.view.query);
            let token = synced.next_token();
            synced.view.status = Status::Loading;
            (token, synced.view.query.clone())
        };
        self.shared.notify();

        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move { shared.fetch(token, query).await });

        FetchHandle { token, handle }
    }

    /// Receiver bumped on every visible state change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.revision.subscribe()
    }

    pub fn snapshot(&self) -> ControllerState<T> {
        self.shared.lock().view.clone()
    }

    pub fn query(&self) -> QueryState {
        self.shared.lock().view.query.clone()
    }

    pub fn items(&self) -> Vec<T> {
        self.shared.lock().view.items.clone()
    }

    pub fn total(&self) -> usize {
        self.shared.lock().view.total
    }

    pub fn total_pages(&self) -> usize {
        self.shared.lock().view.total_pages()
    }

    pub fn status(&self) -> Status {
        self.shared.lock().view.status
    }

    pub fn error_message(&self) -> Option<String> {
        self.shared.lock().view.error_message.clone()
    }

    pub fn current_generation(&self) -> u64 {
        self.shared.lock().view.current_generation
    }

    /// Whether a search fetch is still waiting for its quiet period.
    pub fn is_search_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Number of optimistic mutations whose remote call has not settled.
    pub fn pending_mutations(&self) -> usize {
        self.shared.lock().pending.len()
    }
}
