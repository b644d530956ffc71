//! Response shapes of the PokeAPI endpoints used by the list.
//!
//! Only the fields the list displays are modeled, everything else in the
//! payloads is ignored.

use std::collections::HashMap;

use serde::Deserialize;

/// `GET /pokemon?offset=&limit=`
#[derive(Deserialize, Debug)]
pub struct PokemonListResponse {
    pub count: u32,
    #[serde(default)]
    pub results: Vec<ResourceLink>,
}

/// A `{ name, url }` pointer to another resource
#[derive(Deserialize, Debug, Clone)]
pub struct ResourceLink {
    #[serde(default)]
    pub name: Option<String>,
    pub url: String,
}

/// `{ name }` reference nested inside slots and descriptions
#[derive(Deserialize, Debug, Default)]
pub struct NamedRef {
    #[serde(default)]
    pub name: Option<String>,
}

/// `GET /pokemon/{id}`
#[derive(Deserialize, Debug)]
pub struct PokemonDetail {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: HashMap<String, Option<ArtworkSprites>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ArtworkSprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

impl Sprites {
    /// Official artwork, then the default sprite
    pub fn best_image(&self) -> Option<String> {
        self.other
            .get("official-artwork")
            .and_then(|art| art.as_ref())
            .and_then(|art| art.front_default.clone())
            .or_else(|| self.front_default.clone())
    }
}

#[derive(Deserialize, Debug)]
pub struct AbilitySlot {
    #[serde(default)]
    pub ability: NamedRef,
}

#[derive(Deserialize, Debug)]
pub struct TypeSlot {
    #[serde(default, rename = "type")]
    pub kind: NamedRef,
}

/// `GET /characteristic/{id}`
#[derive(Deserialize, Debug)]
pub struct CharacteristicResponse {
    #[serde(default)]
    pub descriptions: Vec<Description>,
}

#[derive(Deserialize, Debug)]
pub struct Description {
    pub description: String,
    #[serde(default)]
    pub language: NamedRef,
}

impl CharacteristicResponse {
    /// The description written in `language`, if any
    pub fn in_language(self, language: &str) -> Option<String> {
        self.descriptions
            .into_iter()
            .find(|d| d.language.name.as_deref() == Some(language))
            .map(|d| d.description)
    }
}
