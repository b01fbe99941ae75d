use thiserror::Error;

/// pokedex error types
///
/// `Clone` so a single failed cache entry can be reported to every handle
/// attached to it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PokedexError {
    /// Malformed input variables, rejected before dispatch
    #[error("validation error: {0}")]
    Validation(String),

    /// Network failure or non-2xx response
    #[error("transport error: {0}")]
    Transport(String),

    /// Endpoint answered with a populated `errors` array
    #[error("graphql error: {0}")]
    Graph(String),

    /// Detail query matched no record
    #[error("pokemon #{0} not found")]
    NotFound(i64),

    /// Response body did not match the expected shape
    #[error("parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl PokedexError {
    /// True for errors caused by the caller's input rather than upstream
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<serde_json::Error> for PokedexError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type alias for pokedex
pub type Result<T> = std::result::Result<T, PokedexError>;
