//! GraphQL-over-HTTP transport
//!
//! POSTs `{query, variables, operationName}` and unwraps the `{data, errors}`
//! envelope. Everything that is not a clean `data` payload becomes an error.

use crate::services::queries::{Operation, Variables};
use crate::types::{PokedexError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Request body sent to the endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: &'a Variables,
    pub operation_name: &'a str,
}

impl<'a> GraphqlRequest<'a> {
    pub fn new(operation: &'a Operation, variables: &'a Variables) -> Self {
        Self {
            query: operation.document,
            variables,
            operation_name: operation.name,
        }
    }
}

/// One entry of the response `errors` array (minimal fields)
#[derive(Debug, Deserialize)]
pub struct GraphqlErrorEntry {
    pub message: String,
}

/// Response envelope
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse {
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphqlErrorEntry>,
}

impl GraphqlResponse {
    /// Extract `data`, turning a populated `errors` array into `Graph`
    pub fn into_data(self) -> Result<Value> {
        if !self.errors.is_empty() {
            let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(PokedexError::Graph(messages.join("; ")));
        }
        match self.data {
            Some(Value::Null) | None => Err(PokedexError::Graph(
                "response contained no data".to_string(),
            )),
            Some(data) => Ok(data),
        }
    }
}

/// Executes one operation against a GraphQL endpoint, returning `data`
pub trait GraphqlTransport: Send + Sync {
    fn execute(&self, request: &GraphqlRequest<'_>) -> Result<Value>;
}

/// Blocking reqwest transport
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PokedexError::Transport(format!("HTTP client error: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl GraphqlTransport for HttpTransport {
    fn execute(&self, request: &GraphqlRequest<'_>) -> Result<Value> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|e| PokedexError::Transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PokedexError::Transport(format!(
                "{} returned HTTP {}",
                self.endpoint, status
            )));
        }

        let envelope: GraphqlResponse = response
            .json()
            .map_err(|e| PokedexError::Parse(format!("JSON parse error: {}", e)))?;

        envelope.into_data()
    }
}
