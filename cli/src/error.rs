use boundary::{BoundaryError, DraftError, FetchFailure};
use graphql::GraphQlError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Boundary error: {0}")]
    Boundary(#[from] BoundaryError),

    #[error("GraphQL client error: {0}")]
    GraphQl(#[from] GraphQlError),

    #[error("Draft error: {0}")]
    Draft(#[from] DraftError),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchFailure),

    #[error("Failed to parse JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Dialoguer error: {0}")]
    DialoguerError(#[from] dialoguer::Error),

    #[error("Query file not found: {0}")]
    QueryNotFound(PathBuf),

    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(err) => format!("I/O operation failed: {err}"),
            Self::Boundary(err) if err.is_fatal() => format!("Internal error: {err}"),
            Self::Boundary(err) => err.to_string(),
            Self::GraphQl(GraphQlError::ConfigNotFound { path }) => format!(
                "Configuration file not found at {}. Run `portal init` to create one.",
                path.display()
            ),
            Self::GraphQl(err) => err.to_string(),
            Self::Draft(err) => format!("Cannot save block: {err}"),
            Self::Fetch(err) => format!("Request failed: {err}"),
            Self::JsonParseError(err) => format!("Failed to parse JSON: {err}"),
            Self::DialoguerError(err) => format!("UI interaction error: {err}"),
            Self::QueryNotFound(path) => format!("Query file not found at: {}", path.display()),
            Self::Other(msg) => msg.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
