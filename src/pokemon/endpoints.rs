use log::info;
use rocket::{State, serde::json::Json};
use serde::{Deserialize, Serialize};

use crate::{
    app::App,
    json::{JsonResult, JsonStatus},
    query::{FetchOutcome, ListSnapshot},
    views::CardView,
};

/// The fetched list as the home view shows it
#[derive(Serialize)]
struct PokemonList {
    #[serde(flatten)]
    snapshot: ListSnapshot,
    cards: Vec<CardView>,
}

/// Endpoint for getting every Pokemon fetched so far, loading the first page if needed
#[get("/pokemons")]
pub async fn get_pokemons(app: &State<App>) -> JsonResult {
    info!("Request to /api/pokemons");

    app.ensure_first_page().await;

    let snapshot = app.pokemons.snapshot().await;
    let team = app.team().await;
    let cards = snapshot
        .all_results
        .iter()
        .map(|p| CardView::new(p, team.contains(p.id)))
        .collect();

    Ok(JsonStatus::data(PokemonList { snapshot, cards }))
}

/// Endpoint for fetching the next page of Pokemon
#[post("/pokemons/next")]
pub async fn fetch_next_page(app: &State<App>) -> JsonResult {
    info!("Request to /api/pokemons/next");

    match app.load_more().await {
        FetchOutcome::Failed(message) => Err(JsonStatus::error(message)),
        outcome => Ok(JsonStatus::data(outcome)),
    }
}

/// Visibility report sent by the sentinel observer
#[derive(Deserialize, Debug)]
pub struct SentinelReport {
    pub ratio: f64,
    pub generation: u64,
}

/// Endpoint receiving sentinel visibility reports
#[post("/sentinel", data = "<report>")]
pub async fn sentinel(app: &State<App>, report: Json<SentinelReport>) -> JsonResult {
    info!("Request to /api/sentinel");

    if !(0.0..=1.0).contains(&report.ratio) {
        return Err(JsonStatus::error("Ratio must be between 0 and 1"));
    }

    let outcome = app.sentinel_report(report.ratio, report.generation).await;
    Ok(JsonStatus::data(outcome))
}
