use serde::Serialize;

use super::Pokemon;

/// Shown in place of a missing or empty name
pub const NO_NAME: &str = "pokémon sem nome";

/// Shown in place of missing abilities, types or characteristic
pub const NONE_MARKER: &str = "não possui";

/// Served at this path when a Pokemon has no artwork
pub const PLACEHOLDER_IMAGE: &str = "/assets/cover-pokemon.svg";

/// The displayable fields of a Pokemon
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Image,
    Abilities,
    Types,
    Characteristic,
}

impl Field {
    /// The value displayed when the field is absent
    pub fn fallback(self) -> &'static str {
        match self {
            Field::Name => NO_NAME,
            Field::Image => PLACEHOLDER_IMAGE,
            Field::Abilities | Field::Types | Field::Characteristic => NONE_MARKER,
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn join_names(names: &[String]) -> Option<String> {
    let joined = names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    (!joined.is_empty()).then_some(joined)
}

/// Resolves the string displayed for a field of a Pokemon.
///
/// Every component renders Pokemon through this function so a missing field
/// reads the same everywhere. Empty strings and blank list entries count as
/// missing.
pub fn display_value(pokemon: &Pokemon, field: Field) -> String {
    let value = match field {
        Field::Name => present(pokemon.name.as_deref()).map(str::to_string),
        Field::Image => present(pokemon.image.as_deref()).map(str::to_string),
        Field::Abilities => join_names(&pokemon.abilities),
        Field::Types => join_names(&pokemon.types),
        Field::Characteristic => present(pokemon.characteristic.as_deref()).map(str::to_string),
    };

    value.unwrap_or_else(|| field.fallback().to_string())
}

/// Alt text of the Pokemon's image
pub fn image_alt(pokemon: &Pokemon) -> String {
    format!("Imagem do {}", display_value(pokemon, Field::Name))
}

/// Accessible label of the add control while it is enabled
pub fn add_label(pokemon: &Pokemon) -> String {
    format!("Adicionar {} à equipe", display_value(pokemon, Field::Name))
}

/// Accessible label of the add control while the Pokemon is already in the team
pub fn unavailable_label(pokemon: &Pokemon) -> String {
    format!("{} indisponível", display_value(pokemon, Field::Name))
}

/// Accessible label of the remove control in the team panel
pub fn remove_label(pokemon: &Pokemon) -> String {
    format!("Remover {} da equipe", display_value(pokemon, Field::Name))
}
