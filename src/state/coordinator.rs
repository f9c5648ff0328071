//! State coordinator: all reads and writes of health and generation data.
//!
//! # Responsibilities
//! - Probe the store before a request relies on it
//! - Read and advance the generation counter
//! - Write host and fleet health flags
//! - Combine both flags into the health verdict
//!
//! # Design Decisions
//! - Nothing is cached; every query re-reads the store
//! - A malformed counter degrades to 1 instead of failing the caller
//! - The fleet flag only ever forces hosts down, never up

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::observability::metrics;
use crate::state::keys::KeySpace;
use crate::store::{parse_counter, KvStore, StoreError};

/// Initial value of the generation counter.
pub const INITIAL_GENERATION: i64 = 1;

/// Errors surfaced by the coordinator.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// The liveness probe failed.
    #[error("Unable to connect to store: {0}")]
    Connection(#[source] StoreError),

    /// A read or write failed after a successful probe.
    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),
}

pub type CoordinatorResult<T> = Result<T, CoordinatorError>;

/// Value of a health flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Up,
    Down,
}

impl Flag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::Up => "up",
            Flag::Down => "down",
        }
    }
}

/// A mutation requested through `/do/{action}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Change,
    Reset,
    HostUp,
    HostDown,
    AllUp,
    AllDown,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Change,
        Action::Reset,
        Action::HostUp,
        Action::HostDown,
        Action::AllUp,
        Action::AllDown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Change => "change",
            Action::Reset => "reset",
            Action::HostUp => "host_up",
            Action::HostDown => "host_down",
            Action::AllUp => "all_up",
            Action::AllDown => "all_down",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an action name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// Coordinates health and generation state in the shared store.
#[derive(Clone)]
pub struct StateCoordinator {
    store: Arc<dyn KvStore>,
    keys: KeySpace,
    host: String,
}

impl StateCoordinator {
    /// Create a coordinator for `host` over a shared store handle.
    pub fn new(store: Arc<dyn KvStore>, keys: KeySpace, host: impl Into<String>) -> Self {
        Self {
            store,
            keys,
            host: host.into(),
        }
    }

    /// Identifier of the host this coordinator speaks for.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Probe the store. Safe to call once per request.
    pub async fn init(&self) -> CoordinatorResult<()> {
        self.store.ping().await.map_err(|e| {
            tracing::error!(error = %e, "Store probe failed");
            metrics::record_store_error("ping");
            CoordinatorError::Connection(e)
        })
    }

    /// Current generation. Absent or malformed values read as 1.
    ///
    /// The counter never goes below 1, so stored zero and negative values are
    /// treated as malformed too, not only values that fail to parse.
    pub async fn get(&self) -> CoordinatorResult<i64> {
        let raw = self.read("get", &self.keys.generation()).await?;
        Ok(raw
            .as_deref()
            .and_then(parse_counter)
            .unwrap_or(INITIAL_GENERATION))
    }

    /// Advance the generation by one and return the new value.
    ///
    /// The increment is a single atomic step in the store, so concurrent
    /// callers across the fleet never lose an update.
    pub async fn change(&self) -> CoordinatorResult<i64> {
        let key = self.keys.generation();
        let generation = self.store.increment(&key).await.map_err(|e| {
            metrics::record_store_error("increment");
            CoordinatorError::Store(e)
        })?;
        tracing::info!(generation, "Generation advanced");
        Ok(generation)
    }

    /// Put the generation back to 1.
    pub async fn reset(&self) -> CoordinatorResult<()> {
        self.write(&self.keys.generation(), &INITIAL_GENERATION.to_string()).await?;
        tracing::info!("Generation reset");
        Ok(())
    }

    pub async fn host_up(&self) -> CoordinatorResult<()> {
        self.set_host(Flag::Up).await
    }

    pub async fn host_down(&self) -> CoordinatorResult<()> {
        self.set_host(Flag::Down).await
    }

    pub async fn all_up(&self) -> CoordinatorResult<()> {
        self.set_fleet(Flag::Up).await
    }

    pub async fn all_down(&self) -> CoordinatorResult<()> {
        self.set_fleet(Flag::Down).await
    }

    /// True iff this host's flag or the fleet flag is `down`.
    pub async fn is_down(&self) -> CoordinatorResult<bool> {
        let host = self.read("get", &self.keys.host_health(&self.host)).await?;
        let fleet = self.read("get", &self.keys.fleet_health()).await?;

        let down = Some(Flag::Down.as_str());
        Ok(host.as_deref() == down || fleet.as_deref() == down)
    }

    /// Apply `action` and return the generation afterwards.
    pub async fn apply(&self, action: Action) -> CoordinatorResult<i64> {
        match action {
            Action::Change => {
                self.change().await?;
            }
            Action::Reset => self.reset().await?,
            Action::HostUp => self.host_up().await?,
            Action::HostDown => self.host_down().await?,
            Action::AllUp => self.all_up().await?,
            Action::AllDown => self.all_down().await?,
        }
        metrics::record_action(action.as_str());
        self.get().await
    }

    async fn set_host(&self, flag: Flag) -> CoordinatorResult<()> {
        self.write(&self.keys.host_health(&self.host), flag.as_str()).await?;
        tracing::info!(host = %self.host, flag = flag.as_str(), "Host health flag set");
        Ok(())
    }

    async fn set_fleet(&self, flag: Flag) -> CoordinatorResult<()> {
        self.write(&self.keys.fleet_health(), flag.as_str()).await?;
        tracing::info!(flag = flag.as_str(), "Fleet health flag set");
        Ok(())
    }

    async fn read(&self, op: &'static str, key: &str) -> CoordinatorResult<Option<String>> {
        self.store.get(key).await.map_err(|e| {
            metrics::record_store_error(op);
            CoordinatorError::Store(e)
        })
    }

    async fn write(&self, key: &str, value: &str) -> CoordinatorResult<()> {
        self.store.set(key, value).await.map_err(|e| {
            metrics::record_store_error("set");
            CoordinatorError::Store(e)
        })
    }
}
