/// Display value resolution (fallback table) module
pub mod display;

/// Pokemon list HTTP endpoints module
pub mod endpoints;

use serde::{Deserialize, Serialize};

/// Represents a Pokemon as listed on the home view
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Pokemon {
    /// The national dex number, identity of the Pokemon
    pub id: u32,

    /// The name of the Pokemon
    #[serde(default)]
    pub name: Option<String>,

    /// URL of the Pokemon's artwork
    #[serde(default)]
    pub image: Option<String>,

    /// Names of the Pokemon's abilities
    #[serde(default)]
    pub abilities: Vec<String>,

    /// Names of the Pokemon's types
    #[serde(default)]
    pub types: Vec<String>,

    /// Short descriptive text, None when no description was available
    #[serde(default)]
    pub characteristic: Option<String>,
}

impl Pokemon {
    /// Creates a Pokemon with only an id and a name, every other field missing
    pub fn named(id: u32, name: &str) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
            image: None,
            abilities: vec![],
            types: vec![],
            characteristic: None,
        }
    }
}

/// Pagination metadata of a fetched page
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Total number of Pokemon reported by the remote source
    pub total: u32,
    /// Offset this page was requested at
    pub offset: u32,
    /// Requested page size
    pub limit: u32,
    /// Whether another page can be requested after this one
    pub has_more: bool,
}

impl Pagination {
    /// Builds pagination metadata, `has_more` is always derived from the other fields
    pub fn new(total: u32, offset: u32, limit: u32) -> Self {
        Self {
            total,
            offset,
            limit,
            has_more: offset.saturating_add(limit) < total,
        }
    }

    /// The offset of the page following this one, None on the last page
    pub fn next_offset(&self) -> Option<u32> {
        self.has_more
            .then(|| self.offset.checked_add(self.limit))
            .flatten()
    }
}

/// One batch of Pokemon returned by the remote source
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Page {
    /// The Pokemon of this page, in remote order
    pub results: Vec<Pokemon>,
    /// Where this page sits in the whole collection
    pub pagination: Pagination,
}
