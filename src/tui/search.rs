//! Client-side name search over the loaded list

use crate::types::Pokemon;

/// Case-insensitive substring match on `name`.
///
/// A blank term keeps everything. Records without a name never match a
/// non-blank term.
pub fn filter_by_name<'a>(pokemon: &'a [Pokemon], term: &str) -> Vec<&'a Pokemon> {
    let term = term.trim();
    if term.is_empty() {
        return pokemon.iter().collect();
    }
    let needle = term.to_lowercase();
    pokemon
        .iter()
        .filter(|p| {
            p.name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect()
}
