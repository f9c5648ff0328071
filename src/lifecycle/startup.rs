//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve the host identity
//! - Create the process-wide store handle and the coordinator
//! - Assemble the application state shared by every request
//!
//! # Design Decisions
//! - Fail fast on a malformed store address
//! - No connection is opened here; stateless processes never need the store

use std::sync::Arc;

use crate::config::ToadConfig;
use crate::http::AppState;
use crate::mode::ModeSelector;
use crate::state::{KeySpace, StateCoordinator};
use crate::store::{KvStore, RedisStore, StoreResult};

/// Build the coordinator over the configured Redis store.
pub fn build_coordinator(config: &ToadConfig) -> StoreResult<StateCoordinator> {
    let store: Arc<dyn KvStore> = Arc::new(RedisStore::new(&config.store)?);
    Ok(coordinator_with_store(config, store))
}

/// Build the coordinator over any store, e.g. an in-memory one.
pub fn coordinator_with_store(config: &ToadConfig, store: Arc<dyn KvStore>) -> StateCoordinator {
    let host = config.host.resolve();
    tracing::info!(host = %host, prefix = %config.keys.prefix, "Coordinator ready");
    StateCoordinator::new(store, KeySpace::new(config.keys.prefix.clone()), host)
}

/// Assemble everything the HTTP handlers need.
pub fn build_state(config: &ToadConfig) -> StoreResult<AppState> {
    let mode = ModeSelector::from_env(config.mode.env_var.clone());
    let coordinator = build_coordinator(config)?;
    Ok(AppState::new(mode, coordinator))
}
