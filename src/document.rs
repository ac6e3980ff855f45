//! Document payload types
//!
//! A conversion request arrives either as templated fields (header/body/
//! footer merged into the letterhead template) or as a raw HTML string
//! forwarded to the conversion service untouched. `DocumentSource` is the
//! single abstraction over both render sources.

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Paper size presets understood by the conversion service.
///
/// Dimensions are in inches, matching the chromium conversion form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    A4,
    Letter,
    Legal,
}

impl PaperSize {
    /// Width and height in inches.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (8.27, 11.69),
            PaperSize::Letter => (8.5, 11.0),
            PaperSize::Legal => (8.5, 14.0),
        }
    }
}

impl Default for PaperSize {
    fn default() -> Self {
        PaperSize::A4
    }
}

/// Page margins in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Margins {
    /// No margins at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// The same inset on all four sides.
    pub fn uniform(inset: f64) -> Self {
        Self {
            top: inset,
            bottom: inset,
            left: inset,
            right: inset,
        }
    }
}

/// Options forwarded with every conversion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Paper size preset
    pub paper_size: PaperSize,
    /// Page margins
    pub margins: Margins,
    /// Zoom factor applied by the renderer
    pub scale: f64,
    /// Capture the page without waiting for network idle.
    /// Faster, but dynamic content may be incomplete.
    pub skip_network_idle: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::default(),
            margins: Margins::none(),
            scale: 1.0,
            skip_network_idle: false,
        }
    }
}

impl RenderOptions {
    /// Reject option values the renderer would choke on.
    pub fn validate(&self) -> Result<(), String> {
        if self.scale <= 0.0 {
            return Err(format!("scale must be positive, got {}", self.scale));
        }
        Ok(())
    }
}

/// The render source for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Header/body/footer merged into the letterhead template.
    Templated {
        header: String,
        body: String,
        footer: String,
    },
    /// Caller-supplied HTML, forwarded verbatim.
    Raw { html: String },
}

impl DocumentSource {
    /// Virtual file name the HTML travels under in the upstream call.
    pub fn upstream_filename(&self) -> &'static str {
        match self {
            DocumentSource::Templated { .. } => "index.html",
            DocumentSource::Raw { .. } => "doc.html",
        }
    }

    /// Short mode label for logging.
    pub fn mode(&self) -> &'static str {
        match self {
            DocumentSource::Templated { .. } => "templated",
            DocumentSource::Raw { .. } => "raw",
        }
    }

    /// Check required fields. Runs before any remote call is made.
    pub fn validate(&self) -> Result<(), GatewayError> {
        match self {
            DocumentSource::Templated { header, body, .. } => {
                if header.trim().is_empty() || body.trim().is_empty() {
                    return Err(GatewayError::MissingTemplateFields);
                }
            }
            DocumentSource::Raw { html } => {
                if html.trim().is_empty() {
                    return Err(GatewayError::MissingHtmlContent);
                }
            }
        }
        Ok(())
    }
}

/// Wire payload accepted by the HTTP endpoints, as JSON or form fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentPayload {
    pub header: Option<String>,
    pub body: Option<String>,
    pub footer: Option<String>,
    #[serde(rename = "htmlContent")]
    pub html_content: Option<String>,
}

impl DocumentPayload {
    /// Resolve the payload into a validated render source.
    ///
    /// Presence of `htmlContent` selects raw mode; templated fields and raw
    /// HTML in the same payload are invalid. A payload with nothing set is
    /// treated as templated and fails the required-field check.
    pub fn into_source(self) -> Result<DocumentSource, GatewayError> {
        let has_templated =
            self.header.is_some() || self.body.is_some() || self.footer.is_some();

        let source = match (has_templated, self.html_content) {
            (true, Some(_)) => return Err(GatewayError::InvalidInput),
            (_, Some(html)) => DocumentSource::Raw { html },
            (_, None) => DocumentSource::Templated {
                header: self.header.unwrap_or_default(),
                body: self.body.unwrap_or_default(),
                footer: self.footer.unwrap_or_default(),
            },
        };

        source.validate()?;
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_size_dimensions() {
        assert_eq!(PaperSize::A4.dimensions(), (8.27, 11.69));
        assert_eq!(PaperSize::Letter.dimensions(), (8.5, 11.0));
        assert_eq!(PaperSize::Legal.dimensions(), (8.5, 14.0));
    }

    #[test]
    fn test_paper_size_deserialize_lowercase() {
        let size: PaperSize = serde_json::from_str("\"letter\"").unwrap();
        assert_eq!(size, PaperSize::Letter);
    }

    #[test]
    fn test_margins_default_is_zero() {
        let margins = Margins::none();
        assert_eq!(margins.top, 0.0);
        assert_eq!(margins.bottom, 0.0);
        assert_eq!(margins.left, 0.0);
        assert_eq!(margins.right, 0.0);
    }

    #[test]
    fn test_margins_uniform() {
        let margins = Margins::uniform(0.5);
        assert_eq!(margins.top, 0.5);
        assert_eq!(margins.right, 0.5);
    }

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.paper_size, PaperSize::A4);
        assert_eq!(options.margins, Margins::none());
        assert_eq!(options.scale, 1.0);
        assert!(!options.skip_network_idle);
    }

    #[test]
    fn test_render_options_validate_scale() {
        let mut options = RenderOptions::default();
        assert!(options.validate().is_ok());

        options.scale = 0.0;
        assert!(options.validate().is_err());

        options.scale = -1.0;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_render_options_partial_toml() {
        let options: RenderOptions =
            toml::from_str("paper_size = \"legal\"\nskip_network_idle = true").unwrap();
        assert_eq!(options.paper_size, PaperSize::Legal);
        assert!(options.skip_network_idle);
        assert_eq!(options.scale, 1.0);
    }

    #[test]
    fn test_upstream_filename_per_mode() {
        let templated = DocumentSource::Templated {
            header: "H".to_string(),
            body: "B".to_string(),
            footer: String::new(),
        };
        assert_eq!(templated.upstream_filename(), "index.html");

        let raw = DocumentSource::Raw {
            html: "<p>x</p>".to_string(),
        };
        assert_eq!(raw.upstream_filename(), "doc.html");
    }

    #[test]
    fn test_templated_requires_header_and_body() {
        let source = DocumentSource::Templated {
            header: "H".to_string(),
            body: String::new(),
            footer: String::new(),
        };
        assert!(matches!(
            source.validate(),
            Err(GatewayError::MissingTemplateFields)
        ));

        let source = DocumentSource::Templated {
            header: "  ".to_string(),
            body: "B".to_string(),
            footer: String::new(),
        };
        assert!(matches!(
            source.validate(),
            Err(GatewayError::MissingTemplateFields)
        ));
    }

    #[test]
    fn test_footer_is_optional() {
        let source = DocumentSource::Templated {
            header: "H".to_string(),
            body: "B".to_string(),
            footer: String::new(),
        };
        assert!(source.validate().is_ok());
    }

    #[test]
    fn test_raw_requires_html() {
        let source = DocumentSource::Raw {
            html: String::new(),
        };
        assert!(matches!(
            source.validate(),
            Err(GatewayError::MissingHtmlContent)
        ));
    }

    #[test]
    fn test_payload_selects_templated_mode() {
        let payload = DocumentPayload {
            header: Some("H".to_string()),
            body: Some("B".to_string()),
            footer: None,
            html_content: None,
        };
        let source = payload.into_source().unwrap();
        assert_eq!(source.mode(), "templated");
    }

    #[test]
    fn test_payload_selects_raw_mode() {
        let payload = DocumentPayload {
            html_content: Some("<h1>Hi</h1>".to_string()),
            ..Default::default()
        };
        let source = payload.into_source().unwrap();
        assert_eq!(source.mode(), "raw");
    }

    #[test]
    fn test_payload_rejects_both_modes() {
        let payload = DocumentPayload {
            header: Some("H".to_string()),
            body: Some("B".to_string()),
            footer: None,
            html_content: Some("<p>x</p>".to_string()),
        };
        assert!(matches!(
            payload.into_source(),
            Err(GatewayError::InvalidInput)
        ));
    }

    #[test]
    fn test_payload_empty_raw_html_rejected() {
        let payload = DocumentPayload {
            html_content: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            payload.into_source(),
            Err(GatewayError::MissingHtmlContent)
        ));
    }

    #[test]
    fn test_payload_empty_is_missing_template_fields() {
        let payload = DocumentPayload::default();
        assert!(matches!(
            payload.into_source(),
            Err(GatewayError::MissingTemplateFields)
        ));
    }

    #[test]
    fn test_payload_html_content_rename() {
        let payload: DocumentPayload =
            serde_json::from_str(r#"{"htmlContent": "<p>x</p>"}"#).unwrap();
        assert_eq!(payload.html_content.as_deref(), Some("<p>x</p>"));
    }
}
