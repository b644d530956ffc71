mod query;

use std::{
    collections::HashMap,
    future::Future,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use tokio::sync::Notify;

use crate::{
    pokeapi::{FetchError, PageSource},
    pokemon::{Page, Pagination, Pokemon},
};

/// In-memory page source recording every request it receives
pub struct MockSource {
    total: u32,
    fixed: HashMap<u32, Page>,
    failing: Vec<u32>,
    gate: Option<Arc<Notify>>,
    requests: Mutex<Vec<(u32, u32)>>,
    calls: AtomicUsize,
}

impl MockSource {
    /// Serves `total` Pokemon named `pokemon-{id}`, ids starting at 1
    pub fn generated(total: u32) -> Self {
        Self {
            total,
            fixed: HashMap::new(),
            failing: vec![],
            gate: None,
            requests: Mutex::new(vec![]),
            calls: AtomicUsize::new(0),
        }
    }

    /// Serves exactly these pages, keyed by their offset
    pub fn fixed(pages: Vec<Page>) -> Self {
        let mut source = Self::generated(0);
        source.fixed = pages
            .into_iter()
            .map(|page| (page.pagination.offset, page))
            .collect();
        source
    }

    /// Requests at this offset fail
    pub fn failing_at(mut self, offset: u32) -> Self {
        self.failing.push(offset);
        self
    }

    /// Every request waits for the gate to be notified before resolving
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(u32, u32)> {
        self.requests.lock().unwrap().clone()
    }
}

// queries borrow the source so tests can inspect it afterwards
impl PageSource for &MockSource {
    fn fetch_page(
        &self,
        offset: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Page, FetchError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push((offset, limit));

        async move {
            match &self.gate {
                Some(gate) => gate.notified().await,
                None => tokio::task::yield_now().await,
            }

            if self.failing.contains(&offset) {
                return Err(FetchError::Status {
                    endpoint: "GET /pokemon".into(),
                    status: 500,
                });
            }

            if !self.fixed.is_empty() {
                return self.fixed.get(&offset).cloned().ok_or(FetchError::Status {
                    endpoint: "GET /pokemon".into(),
                    status: 404,
                });
            }

            let end = offset.saturating_add(limit).min(self.total);
            Ok(Page {
                results: (offset + 1..=end)
                    .map(|id| Pokemon::named(id, &format!("pokemon-{}", id)))
                    .collect(),
                pagination: Pagination::new(self.total, offset, limit),
            })
        }
    }
}

/// A fully populated Pokemon
pub fn pokemon(id: u32, name: &str) -> Pokemon {
    Pokemon {
        id,
        name: Some(name.to_string()),
        image: Some(format!("{}.png", name)),
        abilities: vec!["overgrow".to_string(), "chlorophyll".to_string()],
        types: vec!["grass".to_string(), "poison".to_string()],
        characteristic: Some("Takes plenty of siestas".to_string()),
    }
}

pub fn bulbasaur() -> Pokemon {
    pokemon(1, "bulbasaur")
}

pub fn charmander() -> Pokemon {
    Pokemon {
        id: 4,
        name: Some("charmander".to_string()),
        image: Some("charmander.png".to_string()),
        abilities: vec!["blaze".to_string(), "solar-power".to_string()],
        types: vec!["fire".to_string()],
        characteristic: Some("Likes to run".to_string()),
    }
}

/// Test if the Rocket instance can be built
#[test]
fn test_rocket() {
    use crate::{app::App, build_rocket, config::AppConfig, pokeapi::PokeApiClient};

    let config = AppConfig::default();
    let client = PokeApiClient::new(&config.pokeapi).expect("client should build");
    let _rocket = build_rocket(App::new(config, client)).expect("rocket should build");
    // no panic = success
}
