//! Conversion service client
//!
//! Thin wrapper around the Gotenberg chromium HTML route. One multipart
//! POST per conversion: the HTML travels as a named virtual file next to
//! the paper-size/margin/scale form fields. Single attempt, no retry, no
//! explicit timeout; whatever the transport defaults to is the bound.

use reqwest::multipart;

use crate::document::RenderOptions;
use crate::error::GatewayError;

/// Chromium HTML conversion route, relative to the service base URL.
pub const CONVERT_ROUTE: &str = "/forms/chromium/convert/html";

/// Client for a Gotenberg-compatible conversion service.
#[derive(Debug, Clone)]
pub struct GotenbergClient {
    http: reqwest::Client,
    base_url: String,
    auth: Option<(String, String)>,
}

impl GotenbergClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            auth: None,
        }
    }

    /// Attach basic-auth credentials to every conversion call.
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.auth = Some((username.into(), password.into()));
        self
    }

    /// Convert an HTML document to PDF.
    ///
    /// `filename` is the virtual file name the HTML is attached under.
    /// Returns the full PDF byte payload on success; any transport failure
    /// or non-success status is returned with the upstream error text kept
    /// verbatim.
    pub async fn convert_html(
        &self,
        filename: &str,
        html: String,
        options: &RenderOptions,
    ) -> Result<Vec<u8>, GatewayError> {
        let form = build_form(filename, html, options)?;

        let mut request = self.http.post(self.convert_url()).multipart(form);
        if let Some((username, password)) = &self.auth {
            request = request.basic_auth(username, Some(password));
        }

        let response = request
            .send()
            .await
            .map_err(|err| GatewayError::Request(error_chain(&err)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| GatewayError::Request(error_chain(&err)))?;
        Ok(bytes.to_vec())
    }

    fn convert_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), CONVERT_ROUTE)
    }
}

fn build_form(
    filename: &str,
    html: String,
    options: &RenderOptions,
) -> Result<multipart::Form, GatewayError> {
    let file = multipart::Part::text(html)
        .file_name(filename.to_owned())
        .mime_str("text/html")
        .map_err(|err| GatewayError::Request(error_chain(&err)))?;

    let (width, height) = options.paper_size.dimensions();
    Ok(multipart::Form::new()
        .part("files", file)
        .text("paperWidth", width.to_string())
        .text("paperHeight", height.to_string())
        .text("marginTop", options.margins.top.to_string())
        .text("marginBottom", options.margins.bottom.to_string())
        .text("marginLeft", options.margins.left.to_string())
        .text("marginRight", options.margins.right.to_string())
        .text("scale", options.scale.to_string())
        .text(
            "skipNetworkIdleEvent",
            options.skip_network_idle.to_string(),
        ))
}

/// Flatten an error and its source chain into a single message.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
