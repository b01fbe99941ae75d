//! Response normalization service
//!
//! Flattens the nested PokeAPI GraphQL shapes into [`Pokemon`] and
//! [`PokemonDetail`]. Names, types and sprites live under one-to-many
//! relations that the queries filter to English; every "first element"
//! access is optional and missing values are omitted, never defaulted.

use crate::types::{PokedexError, Pokemon, PokemonDetail, PokemonStat, Result};
use serde::Deserialize;
use serde_json::Value;

/// `{ name }` node used by species names, type names and stat names
#[derive(Debug, Clone, Deserialize)]
pub struct RawName {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSpecies {
    #[serde(default)]
    pub pokemonspeciesnames: Vec<RawName>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDetailSpecies {
    #[serde(default)]
    pub pokemonspeciesnames: Vec<RawName>,
    pub capture_rate: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSprite {
    pub sprites: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawType {
    #[serde(default)]
    pub typenames: Vec<RawName>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTypeRelation {
    #[serde(rename = "type")]
    pub kind: Option<RawType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStat {
    #[serde(default)]
    pub base_stat: Option<i64>,
    #[serde(default)]
    pub stat: Option<RawName>,
}

/// One record of the list query
#[derive(Debug, Clone, Deserialize)]
pub struct RawPokemon {
    pub id: i64,
    pub pokemonspecy: Option<RawSpecies>,
    #[serde(default)]
    pub pokemonsprites: Vec<RawSprite>,
    #[serde(default)]
    pub pokemontypes: Vec<RawTypeRelation>,
}

/// One record of the detail query
#[derive(Debug, Clone, Deserialize)]
pub struct RawPokemonDetail {
    pub id: i64,
    pub pokemonspecy: Option<RawDetailSpecies>,
    #[serde(default)]
    pub pokemonsprites: Vec<RawSprite>,
    #[serde(default)]
    pub pokemontypes: Vec<RawTypeRelation>,
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default)]
    pub weight: Option<i64>,
    #[serde(default)]
    pub pokemonstats: Vec<RawStat>,
}

/// `data` payload of the list query
#[derive(Debug, Clone, Deserialize)]
pub struct ListData {
    #[serde(default)]
    pub pokemon: Vec<RawPokemon>,
}

/// `data` payload of the detail query
#[derive(Debug, Clone, Deserialize)]
pub struct DetailData {
    #[serde(default)]
    pub pokemon: Vec<RawPokemonDetail>,
}

fn first_name(names: &[RawName]) -> Option<String> {
    names.first().and_then(|n| n.name.clone())
}

fn types_of(relations: &[RawTypeRelation]) -> Vec<String> {
    relations
        .iter()
        .filter_map(|rel| rel.kind.as_ref().and_then(|t| first_name(&t.typenames)))
        .collect()
}

fn sprite_of(sprites: &[RawSprite]) -> Option<String> {
    sprites.first().and_then(|s| s.sprites.clone())
}

fn stats_of(stats: &[RawStat]) -> Vec<PokemonStat> {
    // A stat needs both its name and its value to be shown
    stats
        .iter()
        .filter_map(|s| {
            let name = s.stat.as_ref().and_then(|stat| stat.name.clone())?;
            Some(PokemonStat {
                name,
                value: s.base_stat?,
            })
        })
        .collect()
}

fn log_partial(pokemon: &Pokemon) {
    if pokemon.name.is_none() || pokemon.sprite.is_none() {
        tracing::debug!(
            id = %pokemon.id,
            name_missing = pokemon.name.is_none(),
            sprite_missing = pokemon.sprite.is_none(),
            "partial pokemon record"
        );
    }
}

/// Map one list record to a summary
pub fn normalize_summary(raw: &RawPokemon) -> Pokemon {
    let pokemon = Pokemon {
        id: raw.id.to_string(),
        name: raw
            .pokemonspecy
            .as_ref()
            .and_then(|s| first_name(&s.pokemonspeciesnames)),
        types: types_of(&raw.pokemontypes),
        sprite: sprite_of(&raw.pokemonsprites),
    };
    log_partial(&pokemon);
    pokemon
}

/// Map a list payload, preserving upstream order
pub fn normalize_list(data: &ListData) -> Vec<Pokemon> {
    data.pokemon.iter().map(normalize_summary).collect()
}

/// Map one detail record
pub fn normalize_detail_record(raw: &RawPokemonDetail) -> PokemonDetail {
    let species = raw.pokemonspecy.as_ref();
    let summary = Pokemon {
        id: raw.id.to_string(),
        name: species.and_then(|s| first_name(&s.pokemonspeciesnames)),
        types: types_of(&raw.pokemontypes),
        sprite: sprite_of(&raw.pokemonsprites),
    };
    log_partial(&summary);
    PokemonDetail {
        summary,
        capture_rate: species.and_then(|s| s.capture_rate),
        height: raw.height,
        weight: raw.weight,
        stats: stats_of(&raw.pokemonstats),
    }
}

/// Map a detail payload; an empty result set is `NotFound`
pub fn normalize_detail(data: &DetailData, id: i64) -> Result<PokemonDetail> {
    data.pokemon
        .first()
        .map(normalize_detail_record)
        .ok_or(PokedexError::NotFound(id))
}

/// Decode and normalize a raw list `data` value
pub fn list_from_value(data: Value) -> Result<Vec<Pokemon>> {
    let data: ListData = serde_json::from_value(data)?;
    Ok(normalize_list(&data))
}

/// Decode and normalize a raw detail `data` value
pub fn detail_from_value(data: Value, id: i64) -> Result<PokemonDetail> {
    let data: DetailData = serde_json::from_value(data)?;
    normalize_detail(&data, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_list_record(id: i64, name: &str, types: &[&str]) -> Value {
        json!({
            "id": id,
            "pokemonspecy": { "pokemonspeciesnames": [{ "name": name }] },
            "pokemonsprites": [{ "sprites": format!("https://img.example/{}.png", id) }],
            "pokemontypes": types
                .iter()
                .map(|t| json!({ "type": { "typenames": [{ "name": t }] } }))
                .collect::<Vec<_>>(),
        })
    }

    fn raw_pikachu() -> Value {
        json!({
            "pokemon": [{
                "id": 25,
                "pokemonspecy": {
                    "pokemonspeciesnames": [{ "name": "Pikachu" }],
                    "capture_rate": 190
                },
                "pokemonsprites": [{ "sprites": "https://img.example/25.png" }],
                "pokemontypes": [{ "type": { "typenames": [{ "name": "Electric" }] } }],
                "weight": 60,
                "height": 4,
                "pokemonstats": [
                    { "base_stat": 35, "stat": { "name": "hp" } },
                    { "base_stat": 55, "stat": { "name": "attack" } },
                    { "base_stat": 40, "stat": { "name": "defense" } }
                ]
            }]
        })
    }

    // ========== List normalization ==========

    #[test]
    fn test_list_preserves_length_and_order() {
        let data = json!({ "pokemon": [
            raw_list_record(1, "Bulbasaur", &["Grass", "Poison"]),
            raw_list_record(4, "Charmander", &["Fire"]),
        ]});

        let list = list_from_value(data).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "1");
        assert_eq!(list[0].name.as_deref(), Some("Bulbasaur"));
        assert_eq!(list[1].id, "4");
        assert_eq!(list[1].name.as_deref(), Some("Charmander"));
    }

    #[test]
    fn test_types_follow_relation_order_not_alphabetical() {
        let data = json!({ "pokemon": [raw_list_record(1, "Bulbasaur", &["Poison", "Grass"])] });

        let list = list_from_value(data).unwrap();

        assert_eq!(list[0].types, vec!["Poison", "Grass"]);
    }

    #[test]
    fn test_first_localized_name_wins() {
        let data = json!({ "pokemon": [{
            "id": 1,
            "pokemonspecy": { "pokemonspeciesnames": [{ "name": "Bulbasaur" }, { "name": "Other" }] },
            "pokemonsprites": [],
            "pokemontypes": [{ "type": { "typenames": [{ "name": "Grass" }, { "name": "Plante" }] } }]
        }]});

        let list = list_from_value(data).unwrap();

        assert_eq!(list[0].name.as_deref(), Some("Bulbasaur"));
        assert_eq!(list[0].types, vec!["Grass"]);
    }

    #[test]
    fn test_empty_sprites_yield_no_sprite() {
        let data = json!({ "pokemon": [{
            "id": 7,
            "pokemonspecy": { "pokemonspeciesnames": [{ "name": "Squirtle" }] },
            "pokemonsprites": [],
            "pokemontypes": []
        }]});

        let list = list_from_value(data).unwrap();

        assert_eq!(list[0].sprite, None);
        assert!(list[0].types.is_empty());
    }

    #[test]
    fn test_missing_species_name_is_none_not_empty() {
        let data = json!({ "pokemon": [{
            "id": 10,
            "pokemonspecy": { "pokemonspeciesnames": [] },
            "pokemonsprites": [{ "sprites": null }],
            "pokemontypes": []
        }]});

        let list = list_from_value(data).unwrap();

        assert_eq!(list[0].name, None);
        assert_eq!(list[0].sprite, None);
    }

    #[test]
    fn test_null_species_tolerated() {
        let data = json!({ "pokemon": [{ "id": 11, "pokemonspecy": null }] });

        let list = list_from_value(data).unwrap();

        assert_eq!(list[0].name, None);
    }

    #[test]
    fn test_type_relation_without_names_is_skipped() {
        let data = json!({ "pokemon": [{
            "id": 12,
            "pokemontypes": [
                { "type": { "typenames": [] } },
                { "type": { "typenames": [{ "name": "Bug" }] } }
            ]
        }]});

        let list = list_from_value(data).unwrap();

        assert_eq!(list[0].types, vec!["Bug"]);
    }

    #[test]
    fn test_empty_list_payload() {
        assert!(list_from_value(json!({ "pokemon": [] })).unwrap().is_empty());
    }

    #[test]
    fn test_list_shape_mismatch_is_parse_error() {
        let err = list_from_value(json!({ "pokemon": [{ "id": "not-a-number" }] })).unwrap_err();
        assert!(matches!(err, PokedexError::Parse(_)));
    }

    // ========== Detail normalization ==========

    #[test]
    fn test_detail_capture_rate_and_measurements() {
        let detail = detail_from_value(raw_pikachu(), 25).unwrap();

        assert_eq!(detail.summary.id, "25");
        assert_eq!(detail.summary.name.as_deref(), Some("Pikachu"));
        assert_eq!(detail.capture_rate, Some(190));
        assert_eq!(detail.height, Some(4));
        assert_eq!(detail.weight, Some(60));
    }

    #[test]
    fn test_detail_stats_preserve_raw_order() {
        let detail = detail_from_value(raw_pikachu(), 25).unwrap();

        let names: Vec<&str> = detail.stats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["hp", "attack", "defense"]);
        assert_eq!(detail.stats[1].value, 55);
    }

    #[test]
    fn test_detail_not_found_on_empty_result() {
        let err = detail_from_value(json!({ "pokemon": [] }), 99999).unwrap_err();
        assert_eq!(err, PokedexError::NotFound(99999));
    }

    #[test]
    fn test_detail_missing_species_omits_capture_rate() {
        let data = json!({ "pokemon": [{ "id": 3, "height": 20, "weight": 1000 }] });

        let detail = detail_from_value(data, 3).unwrap();

        assert_eq!(detail.capture_rate, None);
        assert_eq!(detail.summary.name, None);
        assert!(detail.stats.is_empty());
    }

    #[test]
    fn test_detail_null_height_is_omitted() {
        let data = json!({ "pokemon": [{ "id": 1, "height": null, "weight": 69 }] });

        let detail = detail_from_value(data, 1).unwrap();

        assert_eq!(detail.height, None);
        assert_eq!(detail.weight, Some(69));
    }

    #[test]
    fn test_detail_incomplete_stats_are_skipped() {
        let data = json!({ "pokemon": [{
            "id": 1,
            "pokemonstats": [
                { "base_stat": null, "stat": { "name": "hp" } },
                { "base_stat": 49, "stat": { "name": "attack" } },
                { "base_stat": 49 },
                { "base_stat": 65, "stat": { "name": null } }
            ]
        }]});

        let detail = detail_from_value(data, 1).unwrap();

        assert_eq!(
            detail.stats,
            vec![PokemonStat {
                name: "attack".to_string(),
                value: 49
            }]
        );
    }
}
