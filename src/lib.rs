//! pdf-gateway - HTML-to-PDF conversion gateway
//!
//! Accepts a document payload over HTTP (header/body/footer fields merged
//! into a letterhead template, or a raw HTML string), forwards it to a
//! Gotenberg-compatible rendering service and streams the resulting PDF
//! back to the caller. A one-shot CLI mode converts a single document and
//! writes the PDF to disk instead.

pub mod cli;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod gateway;
pub mod template;
pub mod web;

pub use cli::{Cli, Commands, ConvertArgs, ServeArgs};
pub use client::GotenbergClient;
pub use config::{ConfigError, GatewayConfig};
pub use document::{DocumentPayload, DocumentSource, Margins, PaperSize, RenderOptions};
pub use error::GatewayError;
pub use gateway::Gateway;
pub use template::DocumentTemplate;
pub use web::{create_router, AppState, ServerConfig, WebServer};

/// Process exit codes
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// General error
    pub const GENERAL_ERROR: i32 = 1;
    /// Missing or invalid configuration
    pub const CONFIG_ERROR: i32 = 2;
}
