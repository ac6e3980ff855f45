//! Conversion pipeline
//!
//! Ties the pieces together: validate the render source, assemble the HTML
//! (template merge or raw pass-through), make the one upstream call. Two
//! delivery paths share the pipeline: `generate` hands the bytes back to
//! the caller, `generate_to_file` persists them to disk.

use std::path::Path;

use crate::client::GotenbergClient;
use crate::config::GatewayConfig;
use crate::document::{DocumentSource, RenderOptions};
use crate::error::GatewayError;
use crate::template::DocumentTemplate;

/// The consolidated conversion gateway.
pub struct Gateway {
    client: GotenbergClient,
    template: DocumentTemplate,
    options: RenderOptions,
}

impl Gateway {
    /// Wire up the gateway from a validated configuration.
    pub fn from_config(config: &GatewayConfig) -> Self {
        let mut client = GotenbergClient::new(config.gotenberg.url.clone());
        if let Some((username, password)) = config.gotenberg.credentials() {
            client = client.with_basic_auth(username, password);
        }
        Self {
            client,
            template: DocumentTemplate::new(
                &config.resources.template_path,
                &config.resources.background_image_path,
            ),
            options: config.render.clone(),
        }
    }

    /// Convert one document and return the PDF bytes.
    ///
    /// Validation runs first; an invalid source never reaches the remote
    /// service.
    pub async fn generate(&self, source: &DocumentSource) -> Result<Vec<u8>, GatewayError> {
        source.validate()?;

        let html = match source {
            DocumentSource::Templated {
                header,
                body,
                footer,
            } => self.template.render(header, body, footer).await?,
            DocumentSource::Raw { html } => html.clone(),
        };

        tracing::debug!(
            mode = source.mode(),
            bytes = html.len(),
            "sending conversion request"
        );
        self.client
            .convert_html(source.upstream_filename(), html, &self.options)
            .await
    }

    /// Convert one document and write the PDF to `path`.
    ///
    /// Returns the number of bytes written.
    pub async fn generate_to_file(
        &self,
        source: &DocumentSource,
        path: &Path,
    ) -> Result<usize, GatewayError> {
        let bytes = self.generate(source).await?;
        tokio::fs::write(path, &bytes)
            .await
            .map_err(GatewayError::OutputWrite)?;
        Ok(bytes.len())
    }
}
