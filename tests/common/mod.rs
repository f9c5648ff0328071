//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use futures_util::future::{self, BoxFuture, FutureExt};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use toad::http::{build_router, AppState};
use toad::mode::{ManualMode, ModeSelector};
use toad::state::{KeySpace, StateCoordinator};
use toad::store::{KvStore, MemoryStore, StoreError, StoreResult};

pub const HOST: &str = "web-1";

/// A store that counts every call and can pretend to be unreachable.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    reads: AtomicUsize,
    writes: AtomicUsize,
    pings: AtomicUsize,
    unreachable: bool,
}

impl CountingStore {
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn pings(&self) -> usize {
        self.pings.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.reads() + self.writes() + self.pings()
    }

    fn refuse<'a, T: Send + 'a>(&self) -> Option<BoxFuture<'a, StoreResult<T>>> {
        self.unreachable.then(|| {
            future::ready(Err(StoreError::Connect("connection refused".to_string()))).boxed()
        })
    }
}

impl KvStore for CountingStore {
    fn ping(&self) -> BoxFuture<'_, StoreResult<()>> {
        self.pings.fetch_add(1, Ordering::SeqCst);
        self.refuse().unwrap_or_else(|| self.inner.ping())
    }

    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, StoreResult<Option<String>>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.refuse().unwrap_or_else(|| self.inner.get(key))
    }

    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BoxFuture<'a, StoreResult<()>> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.refuse().unwrap_or_else(|| self.inner.set(key, value))
    }

    fn increment<'a>(&'a self, key: &'a str) -> BoxFuture<'a, StoreResult<i64>> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.refuse().unwrap_or_else(|| self.inner.increment(key))
    }
}

/// Everything a scenario needs: the router, the mode switch, and the store.
pub struct Harness {
    pub router: Router,
    pub mode: Arc<ManualMode>,
    pub store: Arc<CountingStore>,
    pub coordinator: StateCoordinator,
}

impl Harness {
    pub fn new(store: CountingStore, flag: Option<&str>) -> Self {
        let store = Arc::new(store);
        let mode = Arc::new(ManualMode::new(flag));
        let coordinator = StateCoordinator::new(store.clone(), KeySpace::default(), HOST);
        let state = AppState::new(ModeSelector::manual(mode.clone()), coordinator.clone());

        Self {
            router: build_router(state, Duration::from_secs(5)),
            mode,
            store,
            coordinator,
        }
    }

    pub fn stateless() -> Self {
        Self::new(CountingStore::default(), None)
    }

    pub fn stateful() -> Self {
        Self::new(CountingStore::default(), Some("true"))
    }

    /// Send a GET and return the status and JSON body.
    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, bytes) = self.get_raw(uri).await;
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Send a GET and decode the body into one of the response types.
    pub async fn get_as<T: DeserializeOwned>(&self, uri: &str) -> (StatusCode, T) {
        let (status, bytes) = self.get_raw(uri).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    pub async fn get_raw(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        (status, bytes.to_vec())
    }
}
