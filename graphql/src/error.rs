use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for client setup and configuration
pub type Result<T> = std::result::Result<T, GraphQlError>;

/// Errors while configuring the GraphQL client.
///
/// Failures of individual queries are reported as [`boundary::FetchFailure`].
#[derive(Debug, Error)]
pub enum GraphQlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl GraphQlError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
