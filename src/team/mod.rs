/// Team HTTP endpoints module
pub mod endpoints;

use serde::Serialize;

use crate::pokemon::Pokemon;

/// The user's working selection of Pokemon.
///
/// Members are unique by id and keep insertion order. The store refuses a
/// second Pokemon with an id already present, so a team never holds
/// duplicates whatever the caller does.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct TeamStore {
    members: Vec<Pokemon>,
}

impl TeamStore {
    /// Creates an empty team
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a Pokemon to the end of the team.
    /// Returns false, leaving the team untouched, when its id is already a member.
    pub fn add(&mut self, pokemon: Pokemon) -> bool {
        if self.contains(pokemon.id) {
            return false;
        }
        self.members.push(pokemon);
        true
    }

    /// Removes the member with the given id, returns the removed Pokemon if there was one
    pub fn remove_by_id(&mut self, id: u32) -> Option<Pokemon> {
        let index = self.members.iter().position(|p| p.id == id)?;
        Some(self.members.remove(index))
    }

    /// Empties the team
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Replaces the whole team, later duplicates of an id are dropped
    pub fn replace(&mut self, pokemons: impl IntoIterator<Item = Pokemon>) {
        self.members.clear();
        for pokemon in pokemons {
            self.add(pokemon);
        }
    }

    /// Whether a Pokemon with this id is in the team
    pub fn contains(&self, id: u32) -> bool {
        self.members.iter().any(|p| p.id == id)
    }

    /// The members in insertion order
    pub fn members(&self) -> &[Pokemon] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
