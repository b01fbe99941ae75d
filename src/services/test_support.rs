//! In-memory transports for exercising the cache and the read API

use crate::services::graphql::{GraphqlRequest, GraphqlTransport};
use crate::types::{PokedexError, Result};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

/// `data` payload of a list response with one record per `(id, name)`
pub fn list_payload(records: &[(i64, &str)]) -> Value {
    let pokemon: Vec<Value> = records
        .iter()
        .map(|(id, name)| {
            json!({
                "id": id,
                "pokemonspecy": { "pokemonspeciesnames": [{ "name": name }] },
                "pokemonsprites": [{ "sprites": format!("https://img.example/{}.png", id) }],
                "pokemontypes": [{ "type": { "typenames": [{ "name": "Normal" }] } }]
            })
        })
        .collect();
    json!({ "pokemon": pokemon })
}

/// `data` payload of a detail response for one record
pub fn detail_payload(id: i64, name: &str, capture_rate: i64) -> Value {
    json!({
        "pokemon": [{
            "id": id,
            "pokemonspecy": {
                "pokemonspeciesnames": [{ "name": name }],
                "capture_rate": capture_rate
            },
            "pokemonsprites": [],
            "pokemontypes": [{ "type": { "typenames": [{ "name": "Electric" }] } }],
            "height": 4,
            "weight": 60,
            "pokemonstats": [{ "base_stat": 35, "stat": { "name": "hp" } }]
        }]
    })
}

/// Answers every request immediately with the same payload
pub struct CountingTransport {
    calls: AtomicUsize,
    response: Value,
}

impl CountingTransport {
    pub fn new(response: Value) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            response,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GraphqlTransport for CountingTransport {
    fn execute(&self, _request: &GraphqlRequest<'_>) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// Holds every request until [`release`](Self::release) is called
pub struct GatedTransport {
    calls: AtomicUsize,
    response: Value,
    gate: Mutex<Receiver<()>>,
    opener: Mutex<Sender<()>>,
}

impl GatedTransport {
    pub fn new(response: Value) -> Self {
        let (opener, gate) = mpsc::channel();
        Self {
            calls: AtomicUsize::new(0),
            response,
            gate: Mutex::new(gate),
            opener: Mutex::new(opener),
        }
    }

    /// Let one pending (or future) request through
    pub fn release(&self) {
        let _ = self.opener.lock().unwrap().send(());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GraphqlTransport for GatedTransport {
    fn execute(&self, _request: &GraphqlRequest<'_>) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.gate.lock().unwrap().recv();
        Ok(self.response.clone())
    }
}

/// Fails every request with a transport error
#[derive(Default)]
pub struct FailingTransport {
    calls: AtomicUsize,
}

impl FailingTransport {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GraphqlTransport for FailingTransport {
    fn execute(&self, _request: &GraphqlRequest<'_>) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(PokedexError::Transport("connection refused".to_string()))
    }
}
