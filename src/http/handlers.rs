//! Route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::http::response::{self, InfoBody, STATELESS_ERROR};
use crate::http::server::AppState;
use crate::state::{check_health, Action, HealthOutcome};

/// Time format of the info payload, e.g. `Mon Jan 2 15:04:05 2006`.
const INFO_TIME_FORMAT: &str = "%a %b %-d %H:%M:%S %Y";

/// GET /
pub async fn info(State(state): State<AppState>) -> Json<InfoBody> {
    Json(InfoBody {
        status: "ok".to_string(),
        time: chrono::Local::now().format(INFO_TIME_FORMAT).to_string(),
        host: state.coordinator.host().to_string(),
        release: state.release.to_string(),
    })
}

/// GET /favicon.ico
pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// GET /_health
pub async fn health(State(state): State<AppState>) -> Response {
    match check_health(&state.mode, &state.coordinator).await {
        HealthOutcome::Ok => response::status(StatusCode::OK, "ok"),
        HealthOutcome::Down => response::status(StatusCode::SERVICE_UNAVAILABLE, "down"),
        HealthOutcome::Unavailable(reason) => response::error(StatusCode::SERVICE_UNAVAILABLE, reason),
    }
}

/// GET /do/{action}
///
/// An unrecognized action changes nothing and still reports the current
/// generation.
pub async fn do_action(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    if state.mode.is_stateless() {
        return response::error(StatusCode::BAD_REQUEST, STATELESS_ERROR);
    }

    if let Err(e) = state.coordinator.init().await {
        return response::error(StatusCode::SERVICE_UNAVAILABLE, e.to_string());
    }

    let result = match name.parse::<Action>() {
        Ok(action) => state.coordinator.apply(action).await,
        Err(e) => {
            tracing::warn!(action = %name, error = %e, "Ignoring unknown action");
            state.coordinator.get().await
        }
    };

    match result {
        Ok(current) => response::generation(current),
        Err(e) => {
            tracing::error!(action = %name, error = %e, "Action failed");
            response::error(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> impl IntoResponse {
    response::error(StatusCode::NOT_FOUND, "Not Found")
}
