//! Services for querying, normalizing and caching Pokémon data

pub mod graphql;
pub mod normalizer;
pub mod pokemon_client;
pub mod queries;
pub mod query_cache;

#[cfg(test)]
pub(crate) mod test_support;

pub use graphql::{GraphqlTransport, HttpTransport};
pub use pokemon_client::{PokemonClient, QueryResult};
pub use query_cache::{QueryCache, QueryData, QueryHandle, QueryStatus};
