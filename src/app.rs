use log::info;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
    config::{AppConfig, page_size_for_width},
    pokeapi::{PageSource, PokeApiClient},
    pokemon::Pokemon,
    query::{
        FetchOutcome, ListQuery,
        loader::{LoadStatus, VisibilityLoader},
    },
    team::TeamStore,
    views::{HomeView, SENTINEL_ID},
};

/// What happened to a Pokemon the user asked to add
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyInTeam,
    /// The id is not among the fetched Pokemon
    Unknown,
}

/// Result of a sentinel visibility report
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SentinelOutcome {
    pub triggered: bool,
    pub fetch: Option<FetchOutcome>,
}

/// Application root: every piece of state of the home view, owned in one
/// place and handed to the routes through Rocket's managed state
pub struct App<S = PokeApiClient> {
    pub config: AppConfig,
    pub pokemons: ListQuery<S>,
    team: Mutex<TeamStore>,
    loader: Mutex<VisibilityLoader>,
    /// Team as it was when confirmed, Some while the summary is shown
    confirmation: Mutex<Option<Vec<Pokemon>>>,
    viewport_width: Mutex<Option<u32>>,
}

impl<S: PageSource> App<S> {
    pub fn new(config: AppConfig, source: S) -> Self {
        let pokemons = ListQuery::new(source, config.page_size);

        let mut loader = if config.auto_load {
            VisibilityLoader::new(config.loader_threshold)
        } else {
            VisibilityLoader::unsupported()
        };
        loader.observe(SENTINEL_ID, 0);

        Self {
            config,
            pokemons,
            team: Mutex::new(TeamStore::new()),
            loader: Mutex::new(loader),
            confirmation: Mutex::new(None),
            viewport_width: Mutex::new(None),
        }
    }

    /// Adds a fetched Pokemon to the team by id
    pub async fn add_to_team(&self, id: u32) -> AddOutcome {
        let Some(pokemon) = self.pokemons.find(id).await else {
            return AddOutcome::Unknown;
        };

        if self.team.lock().await.add(pokemon) {
            info!("Added {} to the team", id);
            AddOutcome::Added
        } else {
            AddOutcome::AlreadyInTeam
        }
    }

    /// Removes a member by id, no-op when absent
    pub async fn remove_from_team(&self, id: u32) -> bool {
        let removed = self.team.lock().await.remove_by_id(id).is_some();
        if removed {
            info!("Removed {} from the team", id);
        }
        removed
    }

    /// Replaces the team with the fetched Pokemon matching `ids`, in that order.
    /// Returns the ids that matched no fetched Pokemon.
    pub async fn replace_team(&self, ids: &[u32]) -> Vec<u32> {
        let mut members = Vec::with_capacity(ids.len());
        let mut unknown = vec![];
        for &id in ids {
            match self.pokemons.find(id).await {
                Some(pokemon) => members.push(pokemon),
                None => unknown.push(id),
            }
        }

        let mut team = self.team.lock().await;
        team.replace(members);
        info!("Team replaced with {} Pokemon", team.len());
        unknown
    }

    pub async fn clear_team(&self) {
        self.team.lock().await.clear();
    }

    pub async fn team(&self) -> TeamStore {
        self.team.lock().await.clone()
    }

    /// Opens the summary with a snapshot of the team.
    /// Returns the snapshot, None when the team is empty.
    pub async fn confirm(&self) -> Option<Vec<Pokemon>> {
        let team = self.team.lock().await;
        if team.is_empty() {
            return None;
        }

        let snapshot = team.members().to_vec();
        *self.confirmation.lock().await = Some(snapshot.clone());
        info!("Team of {} confirmed", snapshot.len());
        Some(snapshot)
    }

    pub async fn confirmation(&self) -> Option<Vec<Pokemon>> {
        self.confirmation.lock().await.clone()
    }

    /// Hides the summary, the team is left as is
    pub async fn close_confirmation(&self) {
        *self.confirmation.lock().await = None;
    }

    /// Clears the team and hides the summary
    pub async fn start_new_team(&self) {
        self.team.lock().await.clear();
        *self.confirmation.lock().await = None;
        info!("Starting a new team");
    }

    pub async fn viewport_width(&self) -> Option<u32> {
        *self.viewport_width.lock().await
    }

    /// Sizes pages for the host's viewport. A new size restarts the list
    /// and moves the sentinel subscription to the new fetch trigger.
    pub async fn apply_viewport(&self, width: u32) -> bool {
        *self.viewport_width.lock().await = Some(width);

        if !self.pokemons.set_page_size(page_size_for_width(width)).await {
            return false;
        }

        let generation = self.pokemons.snapshot().await.generation;
        self.loader.lock().await.resubscribe(generation);
        true
    }

    /// Loads the first page if nothing was fetched yet
    pub async fn ensure_first_page(&self) -> FetchOutcome {
        self.pokemons.fetch_first_page().await
    }

    /// Fetches the next page on explicit request
    pub async fn load_more(&self) -> FetchOutcome {
        self.pokemons.fetch_next_page().await
    }

    /// Feeds a visibility report of the sentinel to the loader, fetching
    /// the next page when the loader triggers. After a failed fetch no
    /// report triggers until an explicit load succeeds.
    pub async fn sentinel_report(&self, ratio: f64, generation: u64) -> SentinelOutcome {
        let snapshot = self.pokemons.snapshot().await;
        let status = LoadStatus {
            has_next_page: snapshot.has_next_page,
            is_fetching_next_page: snapshot.is_fetching_next_page,
            has_error: snapshot.error.is_some(),
        };

        let triggered = self.loader.lock().await.report(ratio, generation, status);
        if !triggered {
            return SentinelOutcome {
                triggered,
                fetch: None,
            };
        }

        let outcome = self.pokemons.fetch_next_page().await;
        self.loader.lock().await.settled();
        SentinelOutcome {
            triggered,
            fetch: Some(outcome),
        }
    }

    /// Builds the view model of the whole page from the current state
    pub async fn home_view(&self) -> HomeView {
        let list = self.pokemons.snapshot().await;
        let team = self.team.lock().await.clone();
        let confirmation = self.confirmation.lock().await.clone();
        let loader = self.loader.lock().await.clone();

        HomeView::build(&list, &team, confirmation.as_deref(), &loader)
    }

    /// Abandons any in-flight page request
    pub async fn shutdown(&self) {
        self.pokemons.abandon().await;
    }
}
