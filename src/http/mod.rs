//! HTTP shell over the state coordinator.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (correlation id, access log)
//!     → handlers.rs (mode check → coordinator)
//!     → response.rs (JSON bodies)
//! ```
//!
//! # Routes
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/` | Status, time, host, and release |
//! | GET | `/_health` | Health verdict (200 ok, 503 down/unavailable) |
//! | GET | `/do/{action}` | Apply an action, return the generation |
//! | GET | `/favicon.ico` | 204 |

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeCorrelationId, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
