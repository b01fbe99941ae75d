//! Terminal Pokédex over the PokeAPI GraphQL endpoint.
//!
//! [`services::PokemonClient`] exposes the two read operations (list, detail)
//! on top of a deduplicating [`services::QueryCache`]; the `tui` and `cli`
//! modules are its consumers.

pub mod cli;
pub mod config;
pub mod logging;
pub mod services;
pub mod tui;
pub mod types;
