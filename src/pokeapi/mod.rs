//! Typed client for the PokeAPI endpoints behind the Pokemon list.
//!
//! | Method | Path | Used for |
//! |--------|------|----------|
//! | GET | `/pokemon?offset=&limit=` | page of summaries, total count |
//! | GET | `/pokemon/{id}` | name, artwork, abilities, types |
//! | GET | `/characteristic/{id}` | characteristic text |

/// PokeAPI error types
pub mod error;

/// PokeAPI response shapes
pub mod models;

use std::{future::Future, time::Duration};

use futures::future::try_join_all;
use log::debug;
use serde::de::DeserializeOwned;

use crate::{
    config::PokeApiConfig,
    pokemon::{Page, Pagination, Pokemon},
};

pub use error::FetchError;
use models::{CharacteristicResponse, PokemonDetail, PokemonListResponse};

/// A remote source of Pokemon pages
pub trait PageSource: Send + Sync {
    /// Fetches the page starting at `offset` holding at most `limit` Pokemon
    fn fetch_page(
        &self,
        offset: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Page, FetchError>> + Send;
}

/// Client for the PokeAPI REST endpoints
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
    language: String,
}

impl PokeApiClient {
    /// Create a client from the `[pokeapi]` configuration section
    pub fn new(config: &PokeApiConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            language: config.language.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, FetchError> {
        let resp = request.send().await.map_err(|e| FetchError::Http {
            endpoint: endpoint.into(),
            source: e,
        })?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                endpoint: endpoint.into(),
                status: resp.status().as_u16(),
            });
        }

        resp.json().await.map_err(|e| FetchError::Malformed {
            endpoint: endpoint.into(),
            reason: e.to_string(),
        })
    }

    /// Lists one page of Pokemon summaries.
    ///
    /// Calls `GET {base_url}/pokemon?offset={offset}&limit={limit}`.
    pub async fn list(&self, offset: u32, limit: u32) -> Result<PokemonListResponse, FetchError> {
        let url = format!("{}/pokemon", self.base_url);
        let request = self
            .http
            .get(&url)
            .query(&[("offset", offset), ("limit", limit)]);

        self.get_json("GET /pokemon", request).await
    }

    /// Fetches the detail record a summary links to.
    pub async fn detail(&self, url: &str) -> Result<PokemonDetail, FetchError> {
        self.get_json("GET /pokemon/{id}", self.http.get(url)).await
    }

    /// Fetches the characteristic text of a Pokemon in the configured language.
    ///
    /// Calls `GET {base_url}/characteristic/{id}`. Any failure, including a
    /// missing language variant, yields None and leaves the rest of the
    /// Pokemon intact.
    pub async fn characteristic(&self, id: u32) -> Option<String> {
        let url = format!("{}/characteristic/{id}", self.base_url);

        let response: CharacteristicResponse = match self
            .get_json("GET /characteristic/{id}", self.http.get(&url))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!("Characteristic unavailable for {}: {}", id, e);
                return None;
            }
        };

        let description = response.in_language(&self.language);
        if description.is_none() {
            debug!("No '{}' characteristic for {}", self.language, id);
        }
        description
    }

    async fn pokemon(&self, url: &str) -> Result<Pokemon, FetchError> {
        let detail = self.detail(url).await?;
        let characteristic = self.characteristic(detail.id).await;

        Ok(Pokemon {
            id: detail.id,
            name: detail.name,
            image: detail.sprites.best_image(),
            abilities: detail
                .abilities
                .into_iter()
                .filter_map(|slot| slot.ability.name)
                .collect(),
            types: detail
                .types
                .into_iter()
                .filter_map(|slot| slot.kind.name)
                .collect(),
            characteristic,
        })
    }
}

impl PageSource for PokeApiClient {
    fn fetch_page(
        &self,
        offset: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Page, FetchError>> + Send {
        async move {
            let listing = self.list(offset, limit).await?;

            // detail calls run concurrently, results keep the listing order
            let results =
                try_join_all(listing.results.iter().map(|link| self.pokemon(&link.url))).await?;

            Ok(Page {
                results,
                pagination: Pagination::new(listing.count, offset, limit),
            })
        }
    }
}
