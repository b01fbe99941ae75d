//! GraphQL operation definitions
//!
//! Each operation pairs a document with the parameter schema it accepts.
//! Variables are validated against that schema before anything is sent.

use crate::types::{PokedexError, Result};
use serde_json::Value;
use std::collections::BTreeMap;

/// Maximum number of records requested by the list query
pub const LIST_LIMIT: usize = 151;

/// Query variables. A `BTreeMap` so serialization ignores insertion order.
pub type Variables = BTreeMap<String, Value>;

/// Primitive kind of a declared parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Int,
}

impl ParamKind {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Int => value.is_i64() || value.is_u64(),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Int => "Int",
        }
    }
}

/// One declared operation parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
}

/// A named read operation with its selection document
#[derive(Debug, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub params: &'static [ParamSpec],
    pub document: &'static str,
}

impl Operation {
    /// Reject unknown, missing, or mistyped variables
    pub fn validate(&self, variables: &Variables) -> Result<()> {
        for key in variables.keys() {
            if !self.params.iter().any(|p| p.name == key.as_str()) {
                return Err(PokedexError::Validation(format!(
                    "{}: unknown variable ${}",
                    self.name, key
                )));
            }
        }

        for param in self.params {
            match variables.get(param.name) {
                None | Some(Value::Null) if param.required => {
                    return Err(PokedexError::Validation(format!(
                        "{}: missing required variable ${}",
                        self.name, param.name
                    )));
                }
                None | Some(Value::Null) => {}
                Some(value) if !param.kind.accepts(value) => {
                    return Err(PokedexError::Validation(format!(
                        "{}: ${} must be {}, got {}",
                        self.name,
                        param.name,
                        param.kind.label(),
                        value
                    )));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

/// List summaries: first 151 Pokémon ordered by id, optionally filtered by
/// a regex over the English species name.
pub static GET_POKEMONS: Operation = Operation {
    name: "GetPokemons",
    params: &[ParamSpec {
        name: "search",
        kind: ParamKind::String,
        required: false,
    }],
    document: r#"query GetPokemons($search: String) {
  pokemon(
    limit: 151
    order_by: { id: asc }
    where: {
      pokemonspecy: {
        pokemonspeciesnames: { language: { name: { _eq: "en" } }, name: { _regex: $search } }
      }
    }
  ) {
    id
    pokemonspecy {
      pokemonspeciesnames(where: { language: { name: { _eq: "en" } } }) {
        name
      }
    }
    pokemonsprites {
      sprites(path: "other.official-artwork.front_default")
    }
    pokemontypes {
      type {
        typenames(where: { language: { name: { _eq: "en" } } }) {
          name
        }
      }
    }
  }
}"#,
};

/// Single Pokémon by integer id, with stats and species attributes
pub static GET_POKEMON_DETAILS: Operation = Operation {
    name: "GetPokemonDetails",
    params: &[ParamSpec {
        name: "id",
        kind: ParamKind::Int,
        required: true,
    }],
    document: r#"query GetPokemonDetails($id: Int!) {
  pokemon(where: { id: { _eq: $id } }) {
    id
    pokemonspecy {
      pokemonspeciesnames(where: { language: { name: { _eq: "en" } } }) {
        name
      }
      capture_rate
    }
    pokemonsprites {
      sprites(path: "other.official-artwork.front_default")
    }
    pokemontypes {
      type {
        typenames(where: { language: { name: { _eq: "en" } } }) {
          name
        }
      }
    }
    weight
    height
    pokemonstats {
      base_stat
      stat {
        name
      }
    }
  }
}"#,
};

/// Variables for the list query. An empty `search` matches every name.
pub fn list_variables(search: &str) -> Variables {
    let mut vars = Variables::new();
    vars.insert("search".to_string(), Value::String(search.to_string()));
    vars
}

/// Variables for the detail query; the id must be a positive integer
pub fn detail_variables(id: i64) -> Result<Variables> {
    if id <= 0 {
        return Err(PokedexError::Validation(format!(
            "pokemon id must be a positive integer, got {}",
            id
        )));
    }
    let mut vars = Variables::new();
    vars.insert("id".to_string(), Value::from(id));
    Ok(vars)
}

/// Parse user-supplied text into a pokemon id
pub fn parse_pokemon_id(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    let id: i64 = trimmed.parse().map_err(|_| {
        PokedexError::Validation(format!("pokemon id must be numeric, got {:?}", trimmed))
    })?;
    if id <= 0 {
        return Err(PokedexError::Validation(format!(
            "pokemon id must be a positive integer, got {}",
            id
        )));
    }
    Ok(id)
}

/// Server-side search pattern: substring match with metacharacters escaped
pub fn search_pattern(term: &str) -> String {
    let term = term.trim();
    if term.is_empty() {
        return String::new();
    }
    format!(".*{}.*", regex::escape(term))
}
