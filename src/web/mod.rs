//! HTTP layer for the gateway
//!
//! Exposes the conversion endpoints, the static form page, and a health
//! check. Handlers share a read-only `AppState`; no state survives a
//! request.

mod routes;
mod server;

pub use routes::{create_router, ApiError, AppState, ErrorBody, HealthResponse, PdfResponse};
pub use server::{ServerConfig, WebServer};
