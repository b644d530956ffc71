use log::info;
use rocket::{State, serde::json::Json};

use crate::{
    app::{AddOutcome, App},
    json::{JsonResult, JsonStatus},
    views::{SummaryView, TeamPanelView},
};

/// Endpoint for getting the team panel
#[get("/team")]
pub async fn get_team(app: &State<App>) -> JsonResult {
    info!("Request to /api/team");
    let team = app.team().await;
    Ok(JsonStatus::data(TeamPanelView::new(team.members())))
}

/// Endpoint for adding a fetched Pokemon to the team
#[post("/team/<id>")]
pub async fn add_pokemon(app: &State<App>, id: u32) -> JsonResult {
    info!("Request to /api/team/{}", id);

    match app.add_to_team(id).await {
        AddOutcome::Added => Ok(JsonStatus::ok()),
        AddOutcome::AlreadyInTeam => Err(JsonStatus::error("Pokemon is already in the team")),
        AddOutcome::Unknown => Err(JsonStatus::error("Pokemon not found")),
    }
}

/// Endpoint for removing a Pokemon from the team, removing an absent one is not an error
#[delete("/team/<id>")]
pub async fn remove_pokemon(app: &State<App>, id: u32) -> JsonResult {
    info!("Request to /api/team/{}", id);
    app.remove_from_team(id).await;
    Ok(JsonStatus::ok())
}

/// Endpoint for replacing the whole team with fetched Pokemon, by id
#[put("/team", data = "<ids>")]
pub async fn replace_team(app: &State<App>, ids: Json<Vec<u32>>) -> JsonResult {
    info!("Request to /api/team");

    let unknown = app.replace_team(&ids).await;
    if !unknown.is_empty() {
        return Err(JsonStatus::error(format!("Pokemon not found: {:?}", unknown)));
    }
    Ok(JsonStatus::ok())
}

/// Endpoint for emptying the team
#[delete("/team")]
pub async fn clear_team(app: &State<App>) -> JsonResult {
    info!("Request to /api/team");
    app.clear_team().await;
    Ok(JsonStatus::ok())
}

/// Endpoint for confirming the team, returns the summary
#[post("/team/confirm")]
pub async fn confirm_team(app: &State<App>) -> JsonResult {
    info!("Request to /api/team/confirm");

    let snapshot = app
        .confirm()
        .await
        .ok_or_else(|| JsonStatus::error("Team is empty"))?;

    Ok(JsonStatus::data(SummaryView::new(&snapshot)))
}

/// Endpoint for closing the summary without touching the team
#[delete("/confirmation")]
pub async fn close_confirmation(app: &State<App>) -> JsonResult {
    info!("Request to /api/confirmation");
    app.close_confirmation().await;
    Ok(JsonStatus::ok())
}

/// Endpoint for clearing the team and closing the summary
#[post("/confirmation/new-team")]
pub async fn start_new_team(app: &State<App>) -> JsonResult {
    info!("Request to /api/confirmation/new-team");
    app.start_new_team().await;
    Ok(JsonStatus::ok())
}
