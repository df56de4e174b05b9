use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for boundary operations
pub type Result<T> = std::result::Result<T, BoundaryError>;

/// Errors raised while setting up boundaries and their message catalogs
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// A boundary was mounted without a routing context. This is a bug in the
    /// caller and is not recoverable.
    #[error("bug: error boundary is not mounted under a router")]
    MissingRouter,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog parse error in {path}: {source}")]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Catalog entry '{key}' must be a string")]
    InvalidCatalogEntry { key: String },

    #[error("Unknown locale '{locale}'. Available locales: {available}")]
    UnknownLocale { locale: String, available: String },
}

impl BoundaryError {
    /// Whether this error is a programming contract violation rather than an
    /// environmental problem.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingRouter)
    }

    pub fn catalog_parse<P: Into<PathBuf>>(path: P, source: toml::de::Error) -> Self {
        Self::CatalogParse {
            path: path.into(),
            source,
        }
    }
}
