//! Paginated acquisition of the Pokemon list.
//!
//! `ListQuery` accumulates pages fetched from a [`PageSource`] and enforces
//! that at most one request is outstanding. The guard is checked and set
//! under the same lock, and the lock is released while the request runs so
//! readers can render loading states in the meantime.

/// Visibility-triggered loading module
pub mod loader;

use log::{info, warn};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
    pokeapi::PageSource,
    pokemon::{Page, Pagination, Pokemon},
};

/// What a fetch call ended up doing
#[derive(Serialize, Clone, Debug, PartialEq)]
pub enum FetchOutcome {
    /// A page was fetched and appended, carrying the page's offset
    Fetched { offset: u32, count: usize },
    /// Nothing was requested, either no page remains or one is already in flight
    Skipped,
    /// The request failed, the error is kept in the query state
    Failed(String),
    /// The query was reset or abandoned while the request was in flight,
    /// its result was dropped
    Discarded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InFlight {
    None,
    FirstPage,
    NextPage,
}

#[derive(Debug)]
struct QueryState {
    page_size: u32,
    /// Changes whenever the parameters change or the query is abandoned
    generation: u64,
    pages: Vec<Page>,
    in_flight: InFlight,
    error: Option<String>,
}

impl QueryState {
    fn has_next_page(&self) -> bool {
        self.pages
            .last()
            .is_some_and(|page| page.pagination.has_more)
    }

    fn next_offset(&self) -> Option<u32> {
        self.pages.last()?.pagination.next_offset()
    }
}

/// Read-only view of the query at one instant
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListSnapshot {
    /// Every fetched Pokemon, pages concatenated in request order
    pub all_results: Vec<Pokemon>,
    pub is_loading_first_page: bool,
    pub is_fetching_next_page: bool,
    pub has_next_page: bool,
    /// Message of the last failed request, cleared by the next success
    pub error: Option<String>,
    /// Identity of the current fetch trigger
    pub generation: u64,
    pub page_size: u32,
}

/// Cumulative, paginated list of Pokemon
pub struct ListQuery<S> {
    source: S,
    state: Mutex<QueryState>,
}

struct Request {
    offset: u32,
    limit: u32,
    generation: u64,
}

impl<S: PageSource> ListQuery<S> {
    /// Creates an empty query requesting `page_size` Pokemon per page
    pub fn new(source: S, page_size: u32) -> Self {
        Self {
            source,
            state: Mutex::new(QueryState {
                page_size: page_size.max(1),
                generation: 0,
                pages: vec![],
                in_flight: InFlight::None,
                error: None,
            }),
        }
    }

    /// Loads the first page unless a page was already fetched or a request is in flight
    pub async fn fetch_first_page(&self) -> FetchOutcome {
        let request = {
            let mut state = self.state.lock().await;
            if !state.pages.is_empty() || state.in_flight != InFlight::None {
                return FetchOutcome::Skipped;
            }
            state.in_flight = InFlight::FirstPage;
            Request {
                offset: 0,
                limit: state.page_size,
                generation: state.generation,
            }
        };

        self.run(request).await
    }

    /// Loads the page following the last fetched one.
    ///
    /// No-op when the last page reported no more Pokemon or a request is
    /// already in flight. Before any page exists this loads the first one.
    pub async fn fetch_next_page(&self) -> FetchOutcome {
        let request = {
            let mut state = self.state.lock().await;
            if state.in_flight != InFlight::None {
                return FetchOutcome::Skipped;
            }
            if state.pages.is_empty() {
                state.in_flight = InFlight::FirstPage;
                Request {
                    offset: 0,
                    limit: state.page_size,
                    generation: state.generation,
                }
            } else {
                let Some(offset) = state.next_offset() else {
                    return FetchOutcome::Skipped;
                };
                state.in_flight = InFlight::NextPage;
                Request {
                    offset,
                    limit: state.page_size,
                    generation: state.generation,
                }
            }
        };

        self.run(request).await
    }

    async fn run(&self, request: Request) -> FetchOutcome {
        info!(
            "Fetching Pokemon page at offset {} (limit {})",
            request.offset, request.limit
        );
        let result = self.source.fetch_page(request.offset, request.limit).await;

        let mut state = self.state.lock().await;
        if state.generation != request.generation {
            info!("Dropping stale page at offset {}", request.offset);
            return FetchOutcome::Discarded;
        }
        state.in_flight = InFlight::None;

        match result {
            Ok(mut page) => {
                // stored pages always describe the requested window
                let pagination =
                    Pagination::new(page.pagination.total, request.offset, request.limit);
                if pagination != page.pagination {
                    warn!(
                        "Page at offset {} reported {:?}, using {:?}",
                        request.offset, page.pagination, pagination
                    );
                }
                page.pagination = pagination;

                let count = page.results.len();
                state.pages.push(page);
                state.error = None;
                FetchOutcome::Fetched {
                    offset: request.offset,
                    count,
                }
            }
            Err(e) => {
                warn!("Fetching Pokemon page at offset {} failed: {}", request.offset, e);
                let message = e.to_string();
                state.error = Some(message.clone());
                FetchOutcome::Failed(message)
            }
        }
    }

    /// Changes the page size, dropping every fetched page if it differs.
    /// Returns whether the size changed.
    pub async fn set_page_size(&self, page_size: u32) -> bool {
        let page_size = page_size.max(1);
        let mut state = self.state.lock().await;
        if state.page_size == page_size {
            return false;
        }

        info!("Page size changed from {} to {}", state.page_size, page_size);
        state.page_size = page_size;
        state.generation += 1;
        state.pages.clear();
        state.in_flight = InFlight::None;
        state.error = None;
        true
    }

    /// Gives up on the request in flight, its result will not be applied.
    /// Fetched pages are kept.
    pub async fn abandon(&self) {
        let mut state = self.state.lock().await;
        if state.in_flight != InFlight::None {
            info!("Abandoning in-flight Pokemon request");
        }
        state.generation += 1;
        state.in_flight = InFlight::None;
    }

    /// Copies out the current state
    pub async fn snapshot(&self) -> ListSnapshot {
        let state = self.state.lock().await;
        ListSnapshot {
            all_results: state
                .pages
                .iter()
                .flat_map(|page| page.results.iter().cloned())
                .collect(),
            is_loading_first_page: state.in_flight == InFlight::FirstPage,
            is_fetching_next_page: state.in_flight == InFlight::NextPage,
            has_next_page: state.has_next_page(),
            error: state.error.clone(),
            generation: state.generation,
            page_size: state.page_size,
        }
    }

    /// Looks a fetched Pokemon up by id
    pub async fn find(&self, id: u32) -> Option<Pokemon> {
        let state = self.state.lock().await;
        state
            .pages
            .iter()
            .flat_map(|page| page.results.iter())
            .find(|p| p.id == id)
            .cloned()
    }
}
