//! Gateway configuration
//!
//! Loaded once at process start: an optional `gateway.toml` (working
//! directory, then the user config dir) overlaid by environment variables.
//! The conversion service URL and the listening port are mandatory and
//! startup is fatal without them. Handlers receive the resulting struct by
//! reference; nothing reads the environment after startup.

use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

use crate::document::RenderOptions;

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "gateway.toml";

/// Default request body limit in bytes (10 MB).
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{0} is not set (required)")]
    MissingRequired(&'static str),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("invalid render options: {0}")]
    Render(String),
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Listening port. Required, from config file or `PORT`.
    pub port: Option<u16>,
    /// Bind address
    pub bind: String,
    /// Request body size cap in bytes
    pub body_limit: usize,
    /// Directory served under `/static` (also holds the index page)
    pub static_dir: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: None,
            bind: "0.0.0.0".to_string(),
            body_limit: DEFAULT_BODY_LIMIT,
            static_dir: PathBuf::from("static"),
        }
    }
}

/// Conversion service endpoint and credentials.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GotenbergSettings {
    /// Base URL of the conversion service. Required.
    pub url: String,
    /// Attach basic-auth credentials to every conversion call
    pub auth_enabled: bool,
    pub username: String,
    pub password: String,
}

impl GotenbergSettings {
    /// Credentials to attach upstream, present only when auth is enabled.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        if self.auth_enabled {
            Some((self.username.as_str(), self.password.as_str()))
        } else {
            None
        }
    }
}

/// Local files read fresh on every templated request.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResourceSettings {
    /// HTML document template
    pub template_path: PathBuf,
    /// Letterhead image embedded into the template as a data URI
    pub background_image_path: PathBuf,
}

impl Default for ResourceSettings {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from("templates/document.html"),
            background_image_path: PathBuf::from("static/letterhead.png"),
        }
    }
}

/// Complete gateway configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub server: ServerSettings,
    pub gotenberg: GotenbergSettings,
    pub resources: ResourceSettings,
    pub render: RenderOptions,
}

impl GatewayConfig {
    /// Load the config file (if any) and overlay the environment.
    ///
    /// Callers apply their own overrides (CLI flags) and then run
    /// `validate` or `validate_upstream` before using the result.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_file() {
            Some(path) => Self::read_file(&path)?,
            None => Self::default(),
        };
        config.apply_env_from(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Load from an explicit config file path, then overlay the environment.
    pub fn load_from_path(path: &PathBuf) -> Result<Self, ConfigError> {
        let mut config = Self::read_file(path)?;
        config.apply_env_from(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Listening port. `validate` guarantees presence on loaded configs.
    pub fn port(&self) -> u16 {
        self.server.port.unwrap_or_default()
    }

    fn find_config_file() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Some(local);
        }
        let user = dirs::config_dir()?.join("pdf-gateway").join(CONFIG_FILE_NAME);
        user.exists().then_some(user)
    }

    fn read_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })
    }

    /// Overlay environment variables onto the current values.
    ///
    /// The lookup is injected so tests can run without touching process
    /// state.
    fn apply_env_from<F>(&mut self, get: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = get("PORT") {
            let port = value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "PORT",
                    value: value.clone(),
                })?;
            self.server.port = Some(port);
        }
        if let Some(value) = get("BIND_ADDR") {
            self.server.bind = value;
        }
        if let Some(value) = get("GOTENBERG_URL") {
            self.gotenberg.url = value;
        }
        if let Some(value) = get("GOTENBERG_IS_AUTH") {
            self.gotenberg.auth_enabled = value.parse().unwrap_or(false);
        }
        if let Some(value) = get("GOTENBERG_USERNAME") {
            self.gotenberg.username = value;
        }
        if let Some(value) = get("GOTENBERG_PASSWORD") {
            self.gotenberg.password = value;
        }
        if let Some(value) = get("TEMPLATE_PATH") {
            self.resources.template_path = PathBuf::from(value);
        }
        if let Some(value) = get("BACKGROUND_IMAGE_PATH") {
            self.resources.background_image_path = PathBuf::from(value);
        }
        if let Some(value) = get("STATIC_DIR") {
            self.server.static_dir = PathBuf::from(value);
        }
        Ok(())
    }

    /// Check the invariants the serving gateway depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_upstream()?;
        if self.server.port.is_none() {
            return Err(ConfigError::MissingRequired("PORT"));
        }
        Ok(())
    }

    /// Check only what a conversion needs. The one-shot CLI path does not
    /// listen on a port.
    pub fn validate_upstream(&self) -> Result<(), ConfigError> {
        if self.gotenberg.url.trim().is_empty() {
            return Err(ConfigError::MissingRequired("GOTENBERG_URL"));
        }
        self.render.validate().map_err(ConfigError::Render)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PaperSize;
    use std::collections::HashMap;

    fn env_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.server.bind, "0.0.0.0");
        assert_eq!(config.server.body_limit, DEFAULT_BODY_LIMIT);
        assert!(config.server.port.is_none());
        assert!(!config.gotenberg.auth_enabled);
        assert_eq!(
            config.resources.template_path,
            PathBuf::from("templates/document.html")
        );
    }

    #[test]
    fn test_parse_toml_sections() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [server]
            port = 3000
            bind = "127.0.0.1"

            [gotenberg]
            url = "http://gotenberg:3000"
            auth_enabled = true
            username = "user"
            password = "secret"

            [render]
            paper_size = "letter"
            scale = 0.9
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, Some(3000));
        assert_eq!(config.gotenberg.url, "http://gotenberg:3000");
        assert_eq!(config.render.paper_size, PaperSize::Letter);
        assert_eq!(config.render.scale, 0.9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config: GatewayConfig = toml::from_str(
            r#"
            [server]
            port = 3000

            [gotenberg]
            url = "http://file-value:3000"
            "#,
        )
        .unwrap();

        let env = env_map(&[
            ("PORT", "8088"),
            ("GOTENBERG_URL", "http://env-value:3000"),
            ("GOTENBERG_IS_AUTH", "true"),
            ("GOTENBERG_USERNAME", "u"),
            ("GOTENBERG_PASSWORD", "p"),
        ]);
        config.apply_env_from(|key| env.get(key).cloned()).unwrap();

        assert_eq!(config.server.port, Some(8088));
        assert_eq!(config.gotenberg.url, "http://env-value:3000");
        assert_eq!(config.gotenberg.credentials(), Some(("u", "p")));
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut config = GatewayConfig::default();
        let env = env_map(&[("PORT", "not-a-port")]);
        let err = config
            .apply_env_from(|key| env.get(key).cloned())
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }

    #[test]
    fn test_missing_url_is_fatal() {
        let mut config = GatewayConfig::default();
        config.server.port = Some(8080);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("GOTENBERG_URL"));
    }

    #[test]
    fn test_missing_port_is_fatal() {
        let mut config = GatewayConfig::default();
        config.gotenberg.url = "http://gotenberg:3000".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_credentials_require_auth_flag() {
        let mut settings = GotenbergSettings {
            username: "u".to_string(),
            password: "p".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.credentials(), None);

        settings.auth_enabled = true;
        assert_eq!(settings.credentials(), Some(("u", "p")));
    }

    #[test]
    fn test_bad_render_options_rejected() {
        let mut config = GatewayConfig::default();
        config.gotenberg.url = "http://gotenberg:3000".to_string();
        config.server.port = Some(8080);
        config.render.scale = -2.0;
        assert!(matches!(config.validate(), Err(ConfigError::Render(_))));
    }
}
