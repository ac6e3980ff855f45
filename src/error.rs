//! Gateway error types
//!
//! Every failure surfaces to the immediate caller; there are no retries.
//! Upstream error text is passed through verbatim inside the wrapping
//! message rather than translated into error codes.

use thiserror::Error;

/// Errors produced by the conversion pipeline.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Request body could not be parsed, or it populated both render sources.
    #[error("Invalid input data")]
    InvalidInput,

    /// Templated mode without a non-empty header and body.
    #[error("Header and Body are required")]
    MissingTemplateFields,

    /// Raw mode without a non-empty HTML string.
    #[error("HTML content is required")]
    MissingHtmlContent,

    /// The letterhead image could not be read. Terminal for the request.
    #[error("Failed to load background image: {0}")]
    BackgroundImage(std::io::Error),

    /// The document template could not be read.
    #[error("template error: {0}")]
    Template(std::io::Error),

    /// The conversion request could not be assembled or sent.
    #[error("conversion request error: {0}")]
    Request(String),

    /// The conversion service answered with a non-success status.
    #[error("conversion service returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Writing the resulting PDF to disk failed (one-shot CLI path).
    #[error("failed to write output file: {0}")]
    OutputWrite(std::io::Error),
}

impl GatewayError {
    /// Client errors are rejected before any remote call is made.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GatewayError::InvalidInput
                | GatewayError::MissingTemplateFields
                | GatewayError::MissingHtmlContent
        )
    }
}
