//! Letterhead template rendering
//!
//! Merges header/body/footer text into the HTML document template. The
//! template and the letterhead image are read from disk on every request so
//! edits take effect without a restart; a missing or unreadable file fails
//! that request only.
//!
//! Substitution is plain placeholder replacement. The output is not
//! validated as HTML; the renderer trusts the template.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::path::{Path, PathBuf};

use crate::error::GatewayError;

/// Placeholder for the header text.
pub const HEADER_PLACEHOLDER: &str = "{{header}}";
/// Placeholder for the body text.
pub const BODY_PLACEHOLDER: &str = "{{body}}";
/// Placeholder for the footer text.
pub const FOOTER_PLACEHOLDER: &str = "{{footer}}";
/// Placeholder for the letterhead image data URI.
pub const BACKGROUND_PLACEHOLDER: &str = "{{background_image}}";

/// Renders documents from the on-disk template and letterhead image.
#[derive(Debug, Clone)]
pub struct DocumentTemplate {
    template_path: PathBuf,
    image_path: PathBuf,
}

impl DocumentTemplate {
    pub fn new(template_path: impl Into<PathBuf>, image_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
            image_path: image_path.into(),
        }
    }

    /// Produce a complete HTML document for the given fields.
    pub async fn render(
        &self,
        header: &str,
        body: &str,
        footer: &str,
    ) -> Result<String, GatewayError> {
        let template = tokio::fs::read_to_string(&self.template_path)
            .await
            .map_err(GatewayError::Template)?;
        let background = self.load_background_image().await?;

        Ok(template
            .replace(BACKGROUND_PLACEHOLDER, &background)
            .replace(HEADER_PLACEHOLDER, header)
            .replace(BODY_PLACEHOLDER, body)
            .replace(FOOTER_PLACEHOLDER, footer))
    }

    /// Read the letterhead image and encode it as a data URI.
    async fn load_background_image(&self) -> Result<String, GatewayError> {
        let bytes = tokio::fs::read(&self.image_path)
            .await
            .map_err(GatewayError::BackgroundImage)?;
        Ok(format!(
            "data:{};base64,{}",
            image_mime(&self.image_path),
            BASE64.encode(bytes)
        ))
    }
}

fn image_mime(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        _ => "image/png",
    }
}
