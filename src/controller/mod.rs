//! Paginated list controller shared by every list page.
//!
//! A controller owns the committed query (search term and page), fetches the
//! matching page from a [`ListSource`] on a spawned task and publishes every
//! state change on a `tokio::sync::watch` channel. Each fetch is tagged with a
//! monotonically increasing generation; a response is committed only while its
//! generation is still the latest, so superseded responses never overwrite
//! newer ones.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::list::{ListQuery, ListResult};
use crate::pagination::{PageControls, Paginated, clamp_page, total_pages};
use crate::services::ServiceResult;

pub mod debounce;
pub mod sources;

pub use debounce::{Debouncer, SEARCH_DEBOUNCE};

/// Fetches one page of entities for a list view.
#[async_trait]
pub trait ListSource: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;

    async fn fetch(&self, query: &ListQuery) -> ServiceResult<ListResult<Self::Item>>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Loaded,
    /// Fetch failed; holds the message shown in place of the table.
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct ListState<T> {
    pub phase: ListPhase,
    pub items: Vec<T>,
    pub total_count: usize,
    pub query: ListQuery,
    /// Raw contents of the search box, committed after [`SEARCH_DEBOUNCE`].
    pub search_input: String,
}

impl<T> ListState<T> {
    fn new(page_size: usize) -> Self {
        Self {
            phase: ListPhase::Idle,
            items: Vec::new(),
            total_count: 0,
            query: ListQuery::new(page_size),
            search_input: String::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            ListPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_count, self.query.page_size)
    }

    pub fn controls(&self) -> PageControls {
        PageControls::new(self.query.page, self.total_pages(), self.is_loading())
    }
}

impl<T: Clone> ListState<T> {
    pub fn paginated(&self) -> Paginated<T> {
        Paginated::new(
            self.items.clone(),
            self.query.page,
            self.total_pages(),
            self.is_loading(),
        )
    }
}

struct InFlight {
    query: ListQuery,
    generation: u64,
    handle: JoinHandle<()>,
}

struct Inner<S: ListSource> {
    source: S,
    state: watch::Sender<ListState<S::Item>>,
    generation: AtomicU64,
    in_flight: Mutex<Option<InFlight>>,
    debouncer: Debouncer,
}

impl<S: ListSource> Inner<S> {
    fn load(self: &Arc<Self>, force: bool) {
        let query = self.state.borrow().query.clone();
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if !force {
            if let Some(current) = in_flight.as_ref() {
                let latest = self.generation.load(Ordering::SeqCst);
                if current.query == query
                    && current.generation == latest
                    && !current.handle.is_finished()
                {
                    log::debug!("Fetch for {query:?} already in flight");
                    return;
                }
            }
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state
            .send_modify(|state| state.phase = ListPhase::Loading);

        let task = Arc::clone(self);
        let task_query = query.clone();
        let handle = tokio::spawn(async move {
            let result = task.source.fetch(&task_query).await;
            task.complete(generation, &task_query, result);
        });

        *in_flight = Some(InFlight {
            query,
            generation,
            handle,
        });
    }

    fn complete(
        self: &Arc<Self>,
        generation: u64,
        query: &ListQuery,
        result: ServiceResult<ListResult<S::Item>>,
    ) {
        let mut clamped = false;
        let committed = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation || &state.query != query {
                return false;
            }

            match result {
                Ok(list) => {
                    let last_page = total_pages(list.total_count, state.query.page_size).max(1);
                    state.total_count = list.total_count;
                    if state.query.page > last_page {
                        log::info!(
                            "Page {} is past the last page {last_page}, reloading",
                            state.query.page
                        );
                        state.query.page = last_page;
                        clamped = true;
                    } else {
                        state.items = list.items;
                        state.phase = ListPhase::Loaded;
                    }
                }
                Err(err) => {
                    log::warn!("List fetch for {query:?} failed: {err}");
                    state.items.clear();
                    state.total_count = 0;
                    state.phase = ListPhase::Failed(err.to_string());
                }
            }
            true
        });

        if !committed {
            log::debug!("Discarding superseded response for {query:?}");
        } else if clamped {
            self.load(true);
        }
    }

    fn commit_search(self: &Arc<Self>, term: String) {
        let changed = self.state.send_if_modified(|state| {
            if state.query.search_term == term && state.query.page == 1 {
                return false;
            }
            state.search_input = term.clone();
            state.query.search_term = term;
            state.query.page = 1;
            true
        });
        if changed {
            self.load(false);
        }
    }

    fn go_to_page(self: &Arc<Self>, page: usize) {
        let changed = self.state.send_if_modified(|state| {
            let target = clamp_page(page, state.total_pages());
            if target == state.query.page && matches!(state.phase, ListPhase::Loading | ListPhase::Loaded)
            {
                return false;
            }
            state.query.page = target;
            true
        });
        if changed {
            self.load(false);
        }
    }
}

/// Drives one list view: query state, fetching, debounced search and paging.
pub struct ListController<S: ListSource> {
    inner: Arc<Inner<S>>,
}

impl<S: ListSource> Clone for ListController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ListSource> ListController<S> {
    pub fn new(source: S, page_size: usize) -> Self {
        let (state, _) = watch::channel(ListState::new(page_size));
        Self {
            inner: Arc::new(Inner {
                source,
                state,
                generation: AtomicU64::new(0),
                in_flight: Mutex::new(None),
                debouncer: Debouncer::default(),
            }),
        }
    }

    pub fn source(&self) -> &S {
        &self.inner.source
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState<S::Item>> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> ListState<S::Item> {
        self.inner.state.borrow().clone()
    }

    /// Starts the initial fetch.
    pub fn mount(&self) {
        self.inner.load(false);
    }

    /// Refetches the current query even if the same fetch is in flight.
    pub fn refresh(&self) {
        self.inner.load(true);
    }

    /// Goes back to page 1 and refetches; used after a source filter changed.
    pub fn restart(&self) {
        self.inner.state.send_modify(|state| state.query.page = 1);
        self.inner.load(true);
    }

    /// Records a keystroke in the search box; the term is committed once
    /// typing pauses for [`SEARCH_DEBOUNCE`].
    pub fn input_search(&self, term: impl Into<String>) {
        let term = term.into();
        self.inner
            .state
            .send_modify(|state| state.search_input = term.clone());

        let inner = Arc::clone(&self.inner);
        self.inner
            .debouncer
            .schedule(async move { inner.commit_search(term) });
    }

    /// Commits a search term immediately and resets to page 1.
    pub fn commit_search(&self, term: impl Into<String>) {
        self.inner.debouncer.cancel();
        self.inner.commit_search(term.into());
    }

    /// Moves to `page`, clamped to the last known page count.
    pub fn go_to_page(&self, page: usize) {
        self.inner.go_to_page(page);
    }

    pub fn first_page(&self) {
        if !self.controls().first_disabled {
            self.go_to_page(1);
        }
    }

    pub fn previous_page(&self) {
        let (page, controls) = self.page_and_controls();
        if !controls.prev_disabled {
            self.go_to_page(page.saturating_sub(1));
        }
    }

    pub fn next_page(&self) {
        let (page, controls) = self.page_and_controls();
        if !controls.next_disabled {
            self.go_to_page(page + 1);
        }
    }

    pub fn last_page(&self) {
        let last = self.inner.state.borrow().total_pages();
        if !self.controls().last_disabled {
            self.go_to_page(last);
        }
    }

    /// Stops the pending debounce timer and the outstanding fetch; a response
    /// still on its way is discarded.
    pub fn unmount(&self) {
        self.inner.debouncer.cancel();
        self.inner.generation.fetch_add(1, Ordering::SeqCst);

        let in_flight = self
            .inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(in_flight) = in_flight {
            in_flight.handle.abort();
        }

        self.inner.state.send_if_modified(|state| {
            if state.is_loading() {
                state.phase = ListPhase::Idle;
                true
            } else {
                false
            }
        });
    }

    /// Waits until no fetch is outstanding and returns the resulting state.
    pub async fn settled(&self) -> ListState<S::Item> {
        let mut rx = self.subscribe();
        match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => (*state).clone(),
            Err(_) => self.snapshot(),
        }
    }

    fn controls(&self) -> PageControls {
        self.inner.state.borrow().controls()
    }

    fn page_and_controls(&self) -> (usize, PageControls) {
        let state = self.inner.state.borrow();
        (state.query.page, state.controls())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::domain::list::paginate_locally;

    struct Numbers {
        total: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ListSource for Numbers {
        type Item = usize;

        async fn fetch(&self, query: &ListQuery) -> ServiceResult<ListResult<usize>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(paginate_locally((1..=self.total).collect(), query))
        }
    }

    fn controller(total: usize) -> ListController<Numbers> {
        ListController::new(
            Numbers {
                total,
                calls: AtomicUsize::new(0),
            },
            7,
        )
    }

    #[tokio::test]
    async fn mount_loads_first_page() {
        let controller = controller(20);
        assert_eq!(controller.snapshot().phase, ListPhase::Idle);

        controller.mount();
        assert!(controller.snapshot().is_loading());
        let state = controller.settled().await;

        assert_eq!(state.phase, ListPhase::Loaded);
        assert_eq!(state.items, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(state.total_pages(), 3);
    }

    #[tokio::test]
    async fn duplicate_mount_does_not_refetch() {
        let controller = controller(5);
        controller.mount();
        controller.mount();
        controller.settled().await;

        assert_eq!(controller.source().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn paging_helpers_respect_boundaries() {
        let controller = controller(20);
        controller.mount();
        controller.settled().await;

        controller.previous_page();
        assert_eq!(controller.snapshot().query.page, 1);

        controller.last_page();
        let state = controller.settled().await;
        assert_eq!(state.query.page, 3);
        assert_eq!(state.items, vec![15, 16, 17, 18, 19, 20]);

        controller.next_page();
        assert_eq!(controller.snapshot().query.page, 3);

        controller.first_page();
        assert_eq!(controller.settled().await.items[0], 1);
    }

    #[tokio::test]
    async fn go_to_page_clamps_to_known_total() {
        let controller = controller(10);
        controller.mount();
        controller.settled().await;

        controller.go_to_page(50);
        assert_eq!(controller.settled().await.query.page, 2);

        controller.go_to_page(0);
        assert_eq!(controller.settled().await.query.page, 1);
    }

    #[tokio::test]
    async fn commit_search_resets_page() {
        let controller = controller(20);
        controller.mount();
        controller.settled().await;
        controller.go_to_page(2);
        controller.settled().await;

        controller.commit_search("7");
        let state = controller.settled().await;

        assert_eq!(state.query.page, 1);
        assert_eq!(state.query.search_term, "7");
        assert_eq!(state.search_input, "7");
    }

    #[tokio::test]
    async fn unmount_returns_to_idle() {
        let controller = controller(3);
        controller.mount();
        controller.unmount();

        let state = controller.snapshot();
        assert_eq!(state.phase, ListPhase::Idle);
        assert!(state.items.is_empty());
    }

    #[test]
    fn paginated_view_reflects_state() {
        let mut state: ListState<usize> = ListState::new(7);
        state.items = vec![8, 9];
        state.total_count = 9;
        state.query.page = 2;

        let view = state.paginated();

        assert_eq!(view.pages, vec![1, 2]);
        assert!(view.controls.next_disabled);
        assert!(!view.controls.prev_disabled);
    }
}
