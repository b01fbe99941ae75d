//! Read API consumed by the UI
//!
//! Every call is non-blocking: it attaches to (or creates) the cache entry
//! for its query and reports the entry's current state as a
//! [`QueryResult`]. Errors are always reported inside the result, never
//! returned or raised.

use crate::config::Config;
use crate::services::graphql::{GraphqlTransport, HttpTransport};
use crate::services::normalizer::{detail_from_value, list_from_value};
use crate::services::queries::{
    detail_variables, list_variables, search_pattern, Variables, GET_POKEMONS,
    GET_POKEMON_DETAILS,
};
use crate::services::query_cache::{QueryCache, QueryData, QueryHandle, QueryStatus};
use crate::types::{PokedexError, Pokemon, PokemonDetail, Result};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// `{data, loading, error}` triple rendered by the UI
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<PokedexError>,
}

impl<T> QueryResult<T> {
    fn failed(data: T, error: PokedexError) -> Self {
        Self {
            data,
            loading: false,
            error: Some(error),
        }
    }
}

fn normalize_list(data: Value, _variables: &Variables) -> Result<QueryData> {
    Ok(QueryData::List(Arc::new(list_from_value(data)?)))
}

fn normalize_detail(data: Value, variables: &Variables) -> Result<QueryData> {
    let id = variables
        .get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| PokedexError::Validation("detail query without $id".to_string()))?;
    Ok(QueryData::Detail(Arc::new(detail_from_value(data, id)?)))
}

fn unexpected_payload() -> PokedexError {
    PokedexError::Parse("cache entry holds a different payload kind".to_string())
}

/// Map a list entry status; data is never absent, only empty
pub fn list_result(status: QueryStatus<QueryData>) -> QueryResult<Vec<Pokemon>> {
    match status {
        QueryStatus::Idle => QueryResult {
            data: Vec::new(),
            loading: false,
            error: None,
        },
        QueryStatus::Loading => QueryResult {
            data: Vec::new(),
            loading: true,
            error: None,
        },
        QueryStatus::Success(QueryData::List(list)) => QueryResult {
            data: list.as_ref().clone(),
            loading: false,
            error: None,
        },
        QueryStatus::Success(QueryData::Detail(_)) => {
            QueryResult::failed(Vec::new(), unexpected_payload())
        }
        QueryStatus::Error(err) => QueryResult::failed(Vec::new(), err),
    }
}

/// Map a detail entry status
pub fn detail_result(status: QueryStatus<QueryData>) -> QueryResult<Option<PokemonDetail>> {
    match status {
        QueryStatus::Idle => QueryResult {
            data: None,
            loading: false,
            error: None,
        },
        QueryStatus::Loading => QueryResult {
            data: None,
            loading: true,
            error: None,
        },
        QueryStatus::Success(QueryData::Detail(detail)) => QueryResult {
            data: Some(detail.as_ref().clone()),
            loading: false,
            error: None,
        },
        QueryStatus::Success(QueryData::List(_)) => QueryResult::failed(None, unexpected_payload()),
        QueryStatus::Error(err) => QueryResult::failed(None, err),
    }
}

/// Pokémon read client over a process-lifetime query cache
pub struct PokemonClient {
    cache: QueryCache,
}

impl PokemonClient {
    pub fn new(transport: Arc<dyn GraphqlTransport>) -> Self {
        Self {
            cache: QueryCache::new(transport),
        }
    }

    /// Client talking HTTP to the configured endpoint
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(
            config.endpoint.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self::new(Arc::new(transport)))
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Handle on the full list (empty server-side filter)
    pub fn list_handle(&self) -> Result<QueryHandle> {
        self.cache
            .fetch(&GET_POKEMONS, list_variables(""), normalize_list)
    }

    /// Handle on a server-side filtered list. Each distinct term is its own key.
    pub fn list_matching_handle(&self, term: &str) -> Result<QueryHandle> {
        self.cache.fetch(
            &GET_POKEMONS,
            list_variables(&search_pattern(term)),
            normalize_list,
        )
    }

    /// Handle on one Pokémon's detail; rejects non-positive ids
    pub fn detail_handle(&self, id: i64) -> Result<QueryHandle> {
        let variables = detail_variables(id)?;
        self.cache
            .fetch(&GET_POKEMON_DETAILS, variables, normalize_detail)
    }

    /// Current state of the full list
    pub fn pokemon_list(&self) -> QueryResult<Vec<Pokemon>> {
        match self.list_handle() {
            Ok(handle) => list_result(handle.status()),
            Err(err) => QueryResult::failed(Vec::new(), err),
        }
    }

    /// Current state of a server-side filtered list
    pub fn pokemon_list_matching(&self, term: &str) -> QueryResult<Vec<Pokemon>> {
        match self.list_matching_handle(term) {
            Ok(handle) => list_result(handle.status()),
            Err(err) => QueryResult::failed(Vec::new(), err),
        }
    }

    /// Current state of one Pokémon's detail
    pub fn pokemon_detail(&self, id: i64) -> QueryResult<Option<PokemonDetail>> {
        match self.detail_handle(id) {
            Ok(handle) => detail_result(handle.status()),
            Err(err) => QueryResult::failed(None, err),
        }
    }
}
