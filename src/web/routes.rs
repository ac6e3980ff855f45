//! REST routes for the gateway
//!
//! Two conversion endpoints share one pipeline and differ only in how the
//! result is served and how failures are worded. Error bodies follow the
//! `{status, message}` contract.

use axum::{
    extract::{FromRequest, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Form, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};

use crate::config::GatewayConfig;
use crate::document::DocumentPayload;
use crate::error::GatewayError;
use crate::gateway::Gateway;

/// Application state shared across handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    pub started_at: DateTime<Utc>,
    pub version: String,
}

impl AppState {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Build the gateway router.
pub fn create_router(state: AppState, config: &GatewayConfig) -> Router {
    let static_dir = &config.server.static_dir;
    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .route("/health", get(health))
        .route("/generate-pdf", post(generate_pdf))
        .route("/preview-pdf", post(preview_pdf))
        .with_state(state)
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: i64,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
    })
}

async fn generate_pdf(
    State(state): State<AppState>,
    ExtractPayload(payload): ExtractPayload,
) -> Result<PdfResponse, ApiError> {
    convert(&state, payload, "Failed to generate PDF", PdfResponse::attachment).await
}

async fn preview_pdf(
    State(state): State<AppState>,
    ExtractPayload(payload): ExtractPayload,
) -> Result<PdfResponse, ApiError> {
    convert(
        &state,
        payload,
        "Failed to generate PDF preview",
        PdfResponse::inline,
    )
    .await
}

async fn convert(
    state: &AppState,
    payload: DocumentPayload,
    wrap: &str,
    respond: fn(Vec<u8>) -> PdfResponse,
) -> Result<PdfResponse, ApiError> {
    let source = payload
        .into_source()
        .map_err(|err| error_response(err, wrap))?;

    tracing::info!(mode = source.mode(), "conversion requested");
    match state.gateway.generate(&source).await {
        Ok(bytes) => {
            tracing::info!(bytes = bytes.len(), "conversion complete");
            Ok(respond(bytes))
        }
        Err(err) => {
            tracing::error!(error = %err, "conversion failed");
            Err(error_response(err, wrap))
        }
    }
}

/// Map a pipeline error onto the wire contract.
///
/// Validation errors keep their fixed messages; resource errors already
/// carry their own wording; everything else is wrapped with the endpoint
/// context, upstream text included verbatim.
fn error_response(err: GatewayError, wrap: &str) -> ApiError {
    if err.is_client_error() {
        ApiError::bad_request(err.to_string())
    } else if matches!(err, GatewayError::BackgroundImage(_)) {
        ApiError::internal(err.to_string())
    } else {
        ApiError::internal(format!("{wrap}: {err}"))
    }
}

/// Payload extractor accepting JSON or form-encoded bodies.
pub struct ExtractPayload(pub DocumentPayload);

impl<S> FromRequest<S> for ExtractPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        let payload = if is_json {
            match Json::<DocumentPayload>::from_request(req, state).await {
                Ok(Json(payload)) => payload,
                Err(_) => return Err(ApiError::invalid_input()),
            }
        } else {
            match Form::<DocumentPayload>::from_request(req, state).await {
                Ok(Form(payload)) => payload,
                Err(_) => return Err(ApiError::invalid_input()),
            }
        };

        Ok(ExtractPayload(payload))
    }
}

/// Binary PDF response
#[derive(Debug)]
pub struct PdfResponse {
    data: Vec<u8>,
    disposition: &'static str,
}

impl PdfResponse {
    /// Serve as a download.
    pub fn attachment(data: Vec<u8>) -> Self {
        Self {
            data,
            disposition: "attachment; filename=\"document.pdf\"",
        }
    }

    /// Serve for in-browser display.
    pub fn inline(data: Vec<u8>) -> Self {
        Self {
            data,
            disposition: "inline",
        }
    }
}

impl IntoResponse for PdfResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/pdf"),
                (header::CONTENT_DISPOSITION, self.disposition),
            ],
            self.data,
        )
            .into_response()
    }
}

/// Wire error body: `{"status": "error", "message": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

/// API error carrying its HTTP status.
#[derive(Debug)]
pub struct ApiError {
    code: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    fn invalid_input() -> Self {
        Self::bad_request(GatewayError::InvalidInput.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.code,
            Json(ErrorBody {
                status: "error",
                message: self.message,
            }),
        )
            .into_response()
    }
}
