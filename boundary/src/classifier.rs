//! Maps fetch failures to displayable message keys and fault attribution.
//!
//! Pure and synchronous: the same failure always yields the same result.

use crate::failure::{ErrorKind, FetchFailure};
use std::fmt;

/// Localisation key of a primary error message.
///
/// Renaming any of these keys in a catalog requires changing this table too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    NetworkError,
    UnexpectedServerError,
    UnexpectedResponse,
    InternalServerError,
    InvalidInput,
    NotAuthorized,
}

impl MessageKey {
    pub fn key(&self) -> &'static str {
        match self {
            Self::NetworkError => "errors.network-error",
            Self::UnexpectedServerError => "unexpected-server-error",
            Self::UnexpectedResponse => "errors.unexpected-response",
            Self::InternalServerError => "errors.internal-server-error",
            Self::InvalidInput => "invalid-input",
            Self::NotAuthorized => "errors.not-authorized",
        }
    }

    /// All keys a translation catalog has to provide.
    pub fn all() -> [MessageKey; 6] {
        [
            Self::NetworkError,
            Self::UnexpectedServerError,
            Self::UnexpectedResponse,
            Self::InternalServerError,
            Self::InvalidInput,
            Self::NotAuthorized,
        ]
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One displayable cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub message_key: MessageKey,
    /// Whether the service operator, not the caller, is to blame.
    pub operator_fault: bool,
}

impl Classification {
    const fn new(message_key: MessageKey, operator_fault: bool) -> Self {
        Self {
            message_key,
            operator_fault,
        }
    }
}

/// Either a single cause or one entry per distinct API error kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationResult {
    Single(Classification),
    Multiple(Vec<Classification>),
}

impl ClassificationResult {
    pub fn items(&self) -> &[Classification] {
        match self {
            Self::Single(c) => std::slice::from_ref(c),
            Self::Multiple(items) => items,
        }
    }

    /// The sole cause, or the first one of several. `None` for an empty list.
    pub fn primary(&self) -> Option<Classification> {
        self.items().first().copied()
    }

    /// True if any listed cause is the operator's fault.
    pub fn any_operator_fault(&self) -> bool {
        self.items().iter().any(|c| c.operator_fault)
    }
}

const UNEXPECTED: Classification = Classification::new(MessageKey::UnexpectedServerError, true);

/// Classify a failure.
pub fn classify(failure: &FetchFailure) -> ClassificationResult {
    match failure {
        FetchFailure::Network { .. } => {
            ClassificationResult::Single(Classification::new(MessageKey::NetworkError, false))
        }
        // TODO: pick messages per status code (404, 502, 503) once the catalogs have them
        FetchFailure::Server { .. } => ClassificationResult::Single(UNEXPECTED),
        FetchFailure::NotJson { .. } => {
            ClassificationResult::Single(Classification::new(MessageKey::UnexpectedResponse, true))
        }
        FetchFailure::Api { errors } => {
            tracing::debug!(?errors, "classifying GraphQL errors");

            let mut kinds: Vec<Option<ErrorKind>> = Vec::new();
            for error in errors {
                if !kinds.contains(&error.kind) {
                    kinds.push(error.kind);
                }
            }

            match kinds.as_slice() {
                // An API error without any error entries should not happen.
                [] => ClassificationResult::Single(UNEXPECTED),
                [kind] => ClassificationResult::Single(kind_to_message(*kind)),
                _ => ClassificationResult::Multiple(kinds.into_iter().map(kind_to_message).collect()),
            }
        }
    }
}

/// Resolve a single API error kind.
pub fn kind_to_message(kind: Option<ErrorKind>) -> Classification {
    match kind {
        None => UNEXPECTED,
        Some(ErrorKind::InternalServerError) => {
            Classification::new(MessageKey::InternalServerError, true)
        }
        Some(ErrorKind::InvalidInput) => Classification::new(MessageKey::InvalidInput, false),
        Some(ErrorKind::NotAuthorized) => Classification::new(MessageKey::NotAuthorized, false),
    }
}
