//! HTML surface of the home view, mounted at `/`.
//!
//! Every intent is a plain form post that redirects back to the page, so
//! the view works without scripts; only the sentinel observer needs them.

use log::info;
use rocket::{
    State,
    http::ContentType,
    response::{Redirect, content::RawHtml},
};

use crate::{
    app::{AddOutcome, App},
    views::html,
};

/// Endpoint rendering the whole home view
#[get("/?<width>")]
pub async fn index(app: &State<App>, width: Option<u32>) -> RawHtml<String> {
    info!("Request to /");

    if let Some(width) = width {
        app.apply_viewport(width).await;
    }

    // pages are sized for the viewport, nothing is fetched before its width is known
    let needs_viewport = app.viewport_width().await.is_none();
    if !needs_viewport {
        app.ensure_first_page().await;
    }

    RawHtml(html::render_page(&app.home_view().await, needs_viewport))
}

/// Endpoint for the add control of a card
#[post("/team/<id>")]
pub async fn add_pokemon(app: &State<App>, id: u32) -> Redirect {
    info!("Request to /team/{}", id);
    if app.add_to_team(id).await == AddOutcome::Unknown {
        info!("Ignoring add of unknown Pokemon {}", id);
    }
    Redirect::to("/")
}

/// Endpoint for the remove control of a team row
#[post("/team/<id>/remove")]
pub async fn remove_pokemon(app: &State<App>, id: u32) -> Redirect {
    info!("Request to /team/{}/remove", id);
    app.remove_from_team(id).await;
    Redirect::to("/")
}

/// Endpoint for the confirm control of the team panel
#[post("/team/confirm")]
pub async fn confirm_team(app: &State<App>) -> Redirect {
    info!("Request to /team/confirm");
    app.confirm().await;
    Redirect::to("/")
}

/// Endpoint for the close control of the summary
#[post("/confirmation/close")]
pub async fn close_confirmation(app: &State<App>) -> Redirect {
    info!("Request to /confirmation/close");
    app.close_confirmation().await;
    Redirect::to("/")
}

/// Endpoint for the start-new-team control of the summary
#[post("/confirmation/new-team")]
pub async fn start_new_team(app: &State<App>) -> Redirect {
    info!("Request to /confirmation/new-team");
    app.start_new_team().await;
    Redirect::to("/")
}

/// Endpoint for loading more Pokemon without the sentinel observer
#[post("/more")]
pub async fn load_more(app: &State<App>) -> Redirect {
    info!("Request to /more");
    app.load_more().await;
    Redirect::to("/")
}

/// Placeholder artwork for Pokemon without an image
#[get("/assets/cover-pokemon.svg")]
pub fn placeholder_image() -> (ContentType, &'static str) {
    (ContentType::SVG, html::PLACEHOLDER_SVG)
}
