use std::str::FromStr;

use anyhow::{Result, anyhow};
use log::info;
use rocket::{Build, Rocket};
use rocket_cors::{AllowedMethods, AllowedOrigins, CorsOptions};

/// Application root module
mod app;
/// config.toml loading module
mod config;
/// HTML home view routes module
mod home;
/// JSON response envelope module
mod json;
/// PokeAPI client module
mod pokeapi;
/// Pokemon model module
mod pokemon;
/// Paginated list and sentinel loader module
mod query;
/// Team store module
mod team;
/// View models module
mod views;

#[cfg(test)]
mod tests;

use crate::{
    app::App,
    config::AppConfig,
    json::{JsonResult, JsonStatus},
    pokeapi::PokeApiClient,
};

#[macro_use]
extern crate rocket;

const CONFIG_PATH: &str = "config.toml";

fn make_cors() -> CorsOptions {
    let allowed_methods: AllowedMethods = ["Get", "Post", "Put", "Delete"]
        .iter()
        .filter_map(|s| FromStr::from_str(s).ok())
        .collect();

    CorsOptions::default()
        .allowed_origins(AllowedOrigins::all())
        .allowed_methods(allowed_methods)
        .allow_credentials(true)
}

/// Builds the Rocket instance serving `app`
fn build_rocket(app: App) -> Result<Rocket<Build>> {
    let cors = make_cors()
        .to_cors()
        .map_err(|e| anyhow!("Error creating CORS fairing: {}", e))?;

    Ok(rocket::build()
        .attach(cors)
        .manage(app)
        .mount(
            "/",
            routes![
                home::index,
                home::add_pokemon,
                home::remove_pokemon,
                home::confirm_team,
                home::close_confirmation,
                home::start_new_team,
                home::load_more,
                home::placeholder_image,
            ],
        )
        .mount(
            "/api",
            routes![
                index,
                pokemon::endpoints::get_pokemons,
                pokemon::endpoints::fetch_next_page,
                pokemon::endpoints::sentinel,
                team::endpoints::get_team,
                team::endpoints::add_pokemon,
                team::endpoints::remove_pokemon,
                team::endpoints::replace_team,
                team::endpoints::clear_team,
                team::endpoints::confirm_team,
                team::endpoints::close_confirmation,
                team::endpoints::start_new_team,
            ],
        ))
}

#[rocket::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::load(CONFIG_PATH)?;
    info!(
        "Listing Pokemon from {} with {} per page",
        config.pokeapi.base_url, config.page_size
    );

    let client = PokeApiClient::new(&config.pokeapi)?;
    let rocket = build_rocket(App::new(config, client))?
        .launch()
        .await
        .map_err(|e| anyhow!("{}", e))?;

    if let Some(app) = rocket.state::<App>() {
        app.shutdown().await;
    }
    Ok(())
}

#[get("/")]
pub async fn index() -> JsonResult {
    info!("Request to /api");
    Ok(JsonStatus::ok())
}
