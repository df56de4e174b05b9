use crate::error::{GraphQlError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Main configuration structure, read from `portal.toml`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PortalConfig {
    /// GraphQL API settings
    pub api: ApiConfig,
    /// Presentation settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// GraphQL API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Full URL of the GraphQL endpoint
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// Headers sent with every request
    pub headers: Option<HashMap<String, String>>,
}

/// Presentation settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UiConfig {
    /// Locale of the built-in message catalog ("en" or "de")
    pub locale: Option<String>,
    /// Additional catalog merged over the built-in one
    pub catalog: Option<String>,
}

impl PortalConfig {
    /// Configuration pointing at `endpoint` with defaults for everything else.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                endpoint: endpoint.into(),
                timeout_seconds: None,
                headers: None,
            },
            ui: UiConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.endpoint_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(GraphQlError::invalid_config(format!(
                "Endpoint must use http or https, got: {}",
                url.scheme()
            )));
        }

        if self.api.timeout_seconds == Some(0) {
            return Err(GraphQlError::invalid_config(
                "timeout_seconds must be greater than zero",
            ));
        }

        if let Some(headers) = &self.api.headers {
            for name in headers.keys() {
                if reqwest::header::HeaderName::from_bytes(name.as_bytes()).is_err() {
                    return Err(GraphQlError::invalid_config(format!(
                        "Invalid header name: {name}"
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn endpoint_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.api.endpoint)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn locale(&self) -> &str {
        self.ui.locale.as_deref().unwrap_or("en")
    }

    /// Make a relative `ui.catalog` relative to `base`, the directory holding
    /// the configuration file.
    pub fn resolve_paths(&mut self, base: &Path) {
        if let Some(catalog) = &self.ui.catalog {
            let catalog_path = Path::new(catalog);
            if catalog_path.is_relative() {
                self.ui.catalog = Some(base.join(catalog_path).to_string_lossy().into_owned());
            }
        }
    }
}
