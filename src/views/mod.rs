//! View models of the home view.
//!
//! Each component of the page is described by a serializable struct holding
//! exactly the strings it shows. The HTML renderer and the JSON API both
//! consume these, so the two surfaces never disagree on labels or fallbacks.

/// HTML rendering module
pub mod html;

use serde::Serialize;

use crate::{
    pokemon::{
        Pokemon,
        display::{self, Field},
    },
    query::{ListSnapshot, loader::VisibilityLoader},
    team::TeamStore,
};

pub const PAGE_TITLE: &str = "Pokémons";
pub const LOADING_TEXT: &str = "Carregando...";
pub const NOTHING_FOUND_TEXT: &str = "Nenhum Pokémon encontrado";
pub const LOADING_MORE_TEXT: &str = "Carregando mais Pokémons...";
pub const LOAD_ERROR_TEXT: &str = "Não foi possível carregar mais Pokémons";
pub const LOAD_MORE_TEXT: &str = "Carregar mais";
pub const SENTINEL_ID: &str = "loader";

pub const ADD_TEXT: &str = "Adicionar à equipe";
pub const UNAVAILABLE_TEXT: &str = "Indisponível";

pub const PANEL_TITLE: &str = "Sua equipe";
pub const PANEL_EMPTY_TEXT: &str = "Nenhum Pokémon adicionado";
pub const CONFIRM_TEXT: &str = "Confirmar Equipe";

pub const SUMMARY_LABEL: &str = "Modal de confirmação de equipe";
pub const SUMMARY_TITLE: &str = "Equipe formada";
pub const SUMMARY_SUBTITLE: &str = "Sua equipe está pronta!";
pub const SUMMARY_TOTAL_TEXT: &str = "Total de pokémons na equipe:";
pub const CLOSE_LABEL: &str = "Fechar modal";
pub const START_NEW_TEAM_TEXT: &str = "Começar nova equipe";

/// One Pokemon card of the list
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CardView {
    pub id: u32,
    pub name: String,
    pub image: String,
    pub image_alt: String,
    pub abilities: String,
    pub types: String,
    pub characteristic: String,
    /// True while the Pokemon is in the team
    pub disabled: bool,
    pub button_text: &'static str,
    /// Accessible name of the add control, reflects `disabled`
    pub button_label: String,
}

impl CardView {
    pub fn new(pokemon: &Pokemon, disabled: bool) -> Self {
        Self {
            id: pokemon.id,
            name: display::display_value(pokemon, Field::Name),
            image: display::display_value(pokemon, Field::Image),
            image_alt: display::image_alt(pokemon),
            abilities: display::display_value(pokemon, Field::Abilities),
            types: display::display_value(pokemon, Field::Types),
            characteristic: display::display_value(pokemon, Field::Characteristic),
            disabled,
            button_text: if disabled { UNAVAILABLE_TEXT } else { ADD_TEXT },
            button_label: if disabled {
                display::unavailable_label(pokemon)
            } else {
                display::add_label(pokemon)
            },
        }
    }
}

/// A member row of the team panel
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct TeamRowView {
    pub id: u32,
    pub name: String,
    pub characteristic: String,
    pub remove_label: String,
}

/// The team panel beside the list
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct TeamPanelView {
    pub title: &'static str,
    pub rows: Vec<TeamRowView>,
    /// Present only while the team is empty
    pub empty_message: Option<&'static str>,
    pub confirm_text: &'static str,
    pub confirm_disabled: bool,
}

impl TeamPanelView {
    pub fn new(team: &[Pokemon]) -> Self {
        Self {
            title: PANEL_TITLE,
            rows: team
                .iter()
                .map(|p| TeamRowView {
                    id: p.id,
                    name: display::display_value(p, Field::Name),
                    characteristic: display::display_value(p, Field::Characteristic),
                    remove_label: display::remove_label(p),
                })
                .collect(),
            empty_message: team.is_empty().then_some(PANEL_EMPTY_TEXT),
            confirm_text: CONFIRM_TEXT,
            confirm_disabled: team.is_empty(),
        }
    }
}

/// A member row of the confirmation summary
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SummaryRowView {
    pub id: u32,
    pub name: String,
    pub image: String,
    pub image_alt: String,
    pub characteristic: String,
}

/// The confirmation summary dialog, built from the team as it was when
/// the user confirmed it
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SummaryView {
    pub label: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub count: usize,
    pub rows: Vec<SummaryRowView>,
    pub total_text: &'static str,
    pub close_label: &'static str,
    pub start_new_team_text: &'static str,
}

impl SummaryView {
    pub fn new(snapshot: &[Pokemon]) -> Self {
        Self {
            label: SUMMARY_LABEL,
            title: SUMMARY_TITLE,
            subtitle: SUMMARY_SUBTITLE,
            count: snapshot.len(),
            rows: snapshot
                .iter()
                .map(|p| SummaryRowView {
                    id: p.id,
                    name: display::display_value(p, Field::Name),
                    image: display::display_value(p, Field::Image),
                    image_alt: display::image_alt(p),
                    characteristic: display::display_value(p, Field::Characteristic),
                })
                .collect(),
            total_text: SUMMARY_TOTAL_TEXT,
            close_label: CLOSE_LABEL,
            start_new_team_text: START_NEW_TEAM_TEXT,
        }
    }
}

/// How the explicit load-more control is offered
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadMore {
    /// Nothing to load, or a load is running
    Hidden,
    /// The observer loads pages, the control only shows without scripts
    NoScript,
    /// Always shown: no observer, or the last load failed
    Visible,
}

/// The marker element below the list whose visibility loads more Pokemon
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SentinelView {
    pub id: &'static str,
    /// Identity of the fetch trigger the host must echo in its reports
    pub generation: u64,
    /// Whether the host should observe the sentinel
    pub observe: bool,
    pub threshold: f64,
    /// Shown inside the sentinel while the next page loads or after a failure
    pub text: Option<&'static str>,
    pub load_more: LoadMore,
    pub load_more_text: &'static str,
}

/// The whole home view
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct HomeView {
    pub title: &'static str,
    pub cards: Vec<CardView>,
    /// Shown in place of the list while it has no cards
    pub list_message: Option<&'static str>,
    /// Present while there are cards to scroll past
    pub sentinel: Option<SentinelView>,
    pub team: TeamPanelView,
    pub summary: Option<SummaryView>,
}

impl HomeView {
    pub fn build(
        list: &ListSnapshot,
        team: &TeamStore,
        confirmation: Option<&[Pokemon]>,
        loader: &VisibilityLoader,
    ) -> Self {
        let cards: Vec<CardView> = list
            .all_results
            .iter()
            .map(|p| CardView::new(p, team.contains(p.id)))
            .collect();

        let list_message = match (cards.is_empty(), list.is_loading_first_page) {
            (false, _) => None,
            (true, true) => Some(LOADING_TEXT),
            (true, false) => Some(NOTHING_FOUND_TEXT),
        };

        let failed = list.error.is_some();
        let observe = loader.subscription().is_some() && list.has_next_page && !failed;
        let load_more = match (list.has_next_page && !list.is_fetching_next_page, observe) {
            (false, _) => LoadMore::Hidden,
            (true, true) => LoadMore::NoScript,
            (true, false) => LoadMore::Visible,
        };
        let text = if list.is_fetching_next_page {
            Some(LOADING_MORE_TEXT)
        } else {
            failed.then_some(LOAD_ERROR_TEXT)
        };

        let sentinel = (!cards.is_empty()).then(|| SentinelView {
            id: SENTINEL_ID,
            generation: list.generation,
            observe,
            threshold: loader.threshold(),
            text,
            load_more,
            load_more_text: LOAD_MORE_TEXT,
        });

        Self {
            title: PAGE_TITLE,
            cards,
            list_message,
            sentinel,
            team: TeamPanelView::new(team.members()),
            summary: confirmation.map(SummaryView::new),
        }
    }
}
