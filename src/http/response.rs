//! JSON response bodies.
//!
//! # Design Decisions
//! - Health checks answer with `status`; failures answer with `error`
//! - Action responses carry only the current generation
//! - Bodies also deserialize so integration tests can read them as types

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// Message returned by `/do/{action}` in stateless mode.
pub const STATELESS_ERROR: &str = "Error! Application is stateless";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationBody {
    pub current: i64,
}

/// Payload of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoBody {
    pub status: String,
    pub time: String,
    pub host: String,
    pub release: String,
}

pub fn status(code: StatusCode, status: &str) -> axum::response::Response {
    (
        code,
        Json(StatusBody {
            status: status.to_string(),
        }),
    )
        .into_response()
}

pub fn error(code: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        code,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

pub fn generation(current: i64) -> axum::response::Response {
    (StatusCode::OK, Json(GenerationBody { current })).into_response()
}
