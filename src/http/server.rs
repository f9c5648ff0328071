//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, correlation id, access log)
//! - Bind server to listener
//! - Stop gracefully on the shutdown signal

use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ToadConfig;
use crate::http::handlers;
use crate::http::request::{access_log, MakeCorrelationId};
use crate::mode::ModeSelector;
use crate::release::Release;
use crate::state::StateCoordinator;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub mode: ModeSelector,
    pub coordinator: StateCoordinator,
    pub release: Release,
}

impl AppState {
    pub fn new(mode: ModeSelector, coordinator: StateCoordinator) -> Self {
        Self {
            mode,
            coordinator,
            release: Release::current(),
        }
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(handlers::info))
        .route("/favicon.ico", get(handlers::favicon))
        .route("/_health", get(handlers::health))
        .route("/do/{action}", get(handlers::do_action))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), access_log))
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeCorrelationId))
}

/// HTTP server for the health coordinator.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and state.
    pub fn new(config: &ToadConfig, state: AppState) -> Self {
        let router = build_router(state, Duration::from_secs(config.timeouts.request_secs));
        Self { router }
    }

    /// Run the server, accepting connections on the given listener until a
    /// shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server received shutdown signal");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
