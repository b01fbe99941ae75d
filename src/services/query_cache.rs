//! Request cache and execution layer
//!
//! Maps `(operation, variables)` to a [`CacheEntry`] for the lifetime of the
//! process. The first request for a key dispatches the query on a background
//! thread; every later request for the same key attaches to the existing
//! entry, whatever its state. Entries move Idle → Loading → Success | Error
//! and never leave a terminal state.

use crate::services::graphql::{GraphqlRequest, GraphqlTransport};
use crate::services::queries::{Operation, Variables};
use crate::types::{PokedexError, Pokemon, PokemonDetail, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// Observable state of one query
#[derive(Debug, Clone, PartialEq)]
pub enum QueryStatus<T> {
    Idle,
    Loading,
    Success(T),
    Error(PokedexError),
}

impl<T> QueryStatus<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Success and Error are terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Error(_))
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Error(_) => "error",
        }
    }

    fn can_become<U>(&self, next: &QueryStatus<U>) -> bool {
        matches!(
            (self, next),
            (Self::Idle, QueryStatus::Loading)
                | (Self::Loading, QueryStatus::Success(_))
                | (Self::Loading, QueryStatus::Error(_))
        )
    }
}

/// Normalized payload held by a successful entry
#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    List(Arc<Vec<Pokemon>>),
    Detail(Arc<PokemonDetail>),
}

/// Turns the raw `data` value into a cached payload
pub type Normalize = fn(Value, &Variables) -> Result<QueryData>;

/// Operation name plus order-independent serialized variables
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    operation: &'static str,
    variables: String,
}

impl CacheKey {
    pub fn new(operation: &Operation, variables: &Variables) -> Self {
        // BTreeMap iterates in key order, so equal maps serialize equally
        let variables = variables
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("&");
        Self {
            operation: operation.name,
            variables,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.operation, self.variables)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct EntryState {
    status: QueryStatus<QueryData>,
    subscribers: Vec<Sender<QueryStatus<QueryData>>>,
}

/// Keyed execution record of one query
pub struct CacheEntry {
    key: CacheKey,
    state: Mutex<EntryState>,
}

impl CacheEntry {
    fn new(key: CacheKey) -> Self {
        Self {
            key,
            state: Mutex::new(EntryState {
                status: QueryStatus::Idle,
                subscribers: Vec::new(),
            }),
        }
    }

    pub fn status(&self) -> QueryStatus<QueryData> {
        lock(&self.state).status.clone()
    }

    /// Apply a transition if the state machine allows it.
    /// Returns false and leaves the entry untouched otherwise.
    fn transition(&self, next: QueryStatus<QueryData>) -> bool {
        let mut state = lock(&self.state);
        if !state.status.can_become(&next) {
            tracing::warn!(
                key = %self.key,
                from = state.status.label(),
                to = next.label(),
                "rejected cache entry transition"
            );
            return false;
        }
        state.status = next;
        let snapshot = state.status.clone();
        state
            .subscribers
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
        if snapshot.is_terminal() {
            // Nothing follows a terminal state
            state.subscribers.clear();
        }
        true
    }

    fn subscribe(&self) -> Receiver<QueryStatus<QueryData>> {
        let (tx, rx) = mpsc::channel();
        let mut state = lock(&self.state);
        let current = state.status.clone();
        let terminal = current.is_terminal();
        let _ = tx.send(current);
        if !terminal {
            state.subscribers.push(tx);
        }
        rx
    }

    fn wait(&self) -> QueryStatus<QueryData> {
        let updates = self.subscribe();
        while let Ok(status) = updates.recv() {
            if status.is_terminal() {
                return status;
            }
        }
        self.status()
    }

    fn wait_timeout(&self, timeout: Duration) -> QueryStatus<QueryData> {
        let deadline = Instant::now() + timeout;
        let updates = self.subscribe();
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match updates.recv_timeout(remaining) {
                Ok(status) if status.is_terminal() => return status,
                Ok(_) => {}
                Err(_) => return self.status(),
            }
        }
    }
}

/// Caller-side view of a cache entry
#[derive(Clone)]
pub struct QueryHandle {
    entry: Arc<CacheEntry>,
}

impl QueryHandle {
    /// Non-blocking snapshot of the current status
    pub fn status(&self) -> QueryStatus<QueryData> {
        self.entry.status()
    }

    /// Receives the current status immediately, then every later transition.
    /// The sender is dropped once the entry settles.
    pub fn subscribe(&self) -> Receiver<QueryStatus<QueryData>> {
        self.entry.subscribe()
    }

    /// Block until the entry reaches Success or Error
    pub fn wait(&self) -> QueryStatus<QueryData> {
        self.entry.wait()
    }

    /// Like [`wait`](Self::wait), returning whatever status holds at the deadline
    pub fn wait_timeout(&self, timeout: Duration) -> QueryStatus<QueryData> {
        self.entry.wait_timeout(timeout)
    }

    /// True when both handles observe the same cache entry
    pub fn shares_entry(&self, other: &QueryHandle) -> bool {
        Arc::ptr_eq(&self.entry, &other.entry)
    }
}

impl fmt::Debug for QueryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryHandle")
            .field("key", &self.entry.key)
            .field("status", &self.status().label())
            .finish()
    }
}

/// Process-lifetime query cache with in-flight deduplication
pub struct QueryCache {
    transport: Arc<dyn GraphqlTransport>,
    entries: Mutex<HashMap<CacheKey, Arc<CacheEntry>>>,
}

impl QueryCache {
    pub fn new(transport: Arc<dyn GraphqlTransport>) -> Self {
        Self {
            transport,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return a handle for `(operation, variables)`, dispatching the query
    /// only if no entry exists for the key yet.
    ///
    /// Invalid variables fail here, before any entry is created.
    pub fn fetch(
        &self,
        operation: &'static Operation,
        variables: Variables,
        normalize: Normalize,
    ) -> Result<QueryHandle> {
        operation.validate(&variables)?;
        let key = CacheKey::new(operation, &variables);

        // Check-then-insert under one lock keeps a single entry per key
        let entry = {
            let mut entries = lock(&self.entries);
            if let Some(existing) = entries.get(&key) {
                tracing::debug!(key = %key, "query cache hit");
                return Ok(QueryHandle {
                    entry: Arc::clone(existing),
                });
            }
            let entry = Arc::new(CacheEntry::new(key.clone()));
            entry.transition(QueryStatus::Loading);
            entries.insert(key, Arc::clone(&entry));
            entry
        };

        tracing::debug!(key = %entry.key, "dispatching query");
        self.dispatch(operation, variables, normalize, Arc::clone(&entry));
        Ok(QueryHandle { entry })
    }

    fn dispatch(
        &self,
        operation: &'static Operation,
        variables: Variables,
        normalize: Normalize,
        entry: Arc<CacheEntry>,
    ) {
        let transport = Arc::clone(&self.transport);
        let worker_entry = Arc::clone(&entry);
        let spawned = thread::Builder::new()
            .name(format!("query-{}", operation.name))
            .spawn(move || {
                let result = transport
                    .execute(&GraphqlRequest::new(operation, &variables))
                    .and_then(|data| normalize(data, &variables));
                let next = match result {
                    Ok(data) => {
                        tracing::info!(key = %worker_entry.key, "query settled");
                        QueryStatus::Success(data)
                    }
                    Err(err) => {
                        tracing::warn!(key = %worker_entry.key, error = %err, "query failed");
                        QueryStatus::Error(err)
                    }
                };
                worker_entry.transition(next);
            });

        if let Err(e) = spawned {
            entry.transition(QueryStatus::Error(PokedexError::Transport(format!(
                "failed to spawn query worker: {}",
                e
            ))));
        }
    }

    /// Current status for a key, if it was ever requested
    pub fn status_of(
        &self,
        operation: &Operation,
        variables: &Variables,
    ) -> Option<QueryStatus<QueryData>> {
        let key = CacheKey::new(operation, variables);
        lock(&self.entries).get(&key).map(|entry| entry.status())
    }

    /// Number of distinct keys ever requested
    pub fn entry_count(&self) -> usize {
        lock(&self.entries).len()
    }
}
