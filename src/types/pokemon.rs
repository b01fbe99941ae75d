use serde::{Deserialize, Serialize};

/// List-view record for one Pokémon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    /// Upstream integer id, rendered as a string
    pub id: String,
    /// English species name; `None` when upstream has no English entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// English type names in upstream relation order
    pub types: Vec<String>,
    /// Official artwork URL (front-facing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
}

impl Pokemon {
    /// Name for display, falling back to `Pokémon #<id>`
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Pokémon #{}", self.id),
        }
    }
}

/// One base stat of a Pokémon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub name: String,
    pub value: i64,
}

/// Detail record: the summary plus extended attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonDetail {
    #[serde(flatten)]
    pub summary: Pokemon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_rate: Option<i64>,
    /// Decimetres, as returned upstream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    /// Hectograms, as returned upstream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    pub stats: Vec<PokemonStat>,
}
