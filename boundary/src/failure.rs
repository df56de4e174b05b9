//! The closed set of failures a data fetch can end in.
//!
//! Anything the fetcher reports that is not one of these four variants is not
//! handled by an error boundary and must keep propagating.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Reason code attached to a single GraphQL error by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InternalServerError,
    InvalidInput,
    NotAuthorized,
}

impl ErrorKind {
    /// Parse the wire representation. Unknown codes yield `None` and are
    /// treated like a missing kind.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "INTERNAL_SERVER_ERROR" => Some(Self::InternalServerError),
            "INVALID_INPUT" => Some(Self::InvalidInput),
            "NOT_AUTHORIZED" => Some(Self::NotAuthorized),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
            Self::InvalidInput => "INVALID_INPUT",
            Self::NotAuthorized => "NOT_AUTHORIZED",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One entry of the `errors` array of a GraphQL response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<serde_json::Value>>,
    #[serde(default, deserialize_with = "lenient_kind", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            kind: None,
            key: None,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    fn path_string(&self) -> Option<String> {
        self.path.as_ref().map(|segments| {
            segments
                .iter()
                .map(|s| match s {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(".")
        })
    }
}

fn lenient_kind<'de, D>(deserializer: D) -> std::result::Result<Option<ErrorKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let code = Option::<String>::deserialize(deserializer)?;
    Ok(code.as_deref().and_then(ErrorKind::from_code))
}

/// A failed data fetch, in exactly one of four categories.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchFailure {
    /// The transport failed before any response arrived.
    #[error("network error while contacting the API: {detail}")]
    Network { detail: String },

    /// A response arrived with a non-success status.
    #[error("server error: API returned status {status}")]
    Server { status: u16, body: Option<String> },

    /// A success response whose body is not the expected JSON payload.
    #[error("API returned an unexpected response: {detail}")]
    NotJson { body: String, detail: String },

    /// The payload parsed but reports that the operation failed.
    #[error("API returned {} error(s): {}", .errors.len(), join_messages(.errors))]
    Api { errors: Vec<ApiError> },
}

fn join_messages(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl FetchFailure {
    pub fn network<S: Into<String>>(detail: S) -> Self {
        Self::Network {
            detail: detail.into(),
        }
    }

    pub fn server(status: u16, body: Option<String>) -> Self {
        Self::Server { status, body }
    }

    pub fn not_json<B: Into<String>, D: Into<String>>(body: B, detail: D) -> Self {
        Self::NotJson {
            body: body.into(),
            detail: detail.into(),
        }
    }

    pub fn api(errors: Vec<ApiError>) -> Self {
        Self::Api { errors }
    }

    /// Full text shown in the diagnostic panel of the fallback page.
    pub fn diagnostic_dump(&self) -> String {
        let mut out = self.to_string();
        match self {
            Self::Network { .. } => {}
            Self::Server { body, .. } => {
                if let Some(body) = body.as_deref().filter(|b| !b.trim().is_empty()) {
                    out.push_str("\n\nResponse body:\n");
                    out.push_str(body);
                }
            }
            Self::NotJson { body, .. } => {
                out.push_str("\n\nResponse body:\n");
                out.push_str(body);
            }
            Self::Api { errors } => {
                for error in errors {
                    out.push_str("\n- ");
                    out.push_str(&error.message);
                    let kind = error.kind.map(|k| k.code()).unwrap_or("<none>");
                    out.push_str(&format!(" (kind: {kind}"));
                    if let Some(key) = &error.key {
                        out.push_str(&format!(", key: {key}"));
                    }
                    if let Some(path) = error.path_string() {
                        out.push_str(&format!(", path: {path}"));
                    }
                    out.push(')');
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_kind_deserializes_as_absent() {
        let error: ApiError = serde_json::from_value(json!({
            "message": "nope",
            "kind": "SOMETHING_NEW",
        }))
        .unwrap();
        assert_eq!(error.kind, None);

        let error: ApiError = serde_json::from_value(json!({
            "message": "bad",
            "kind": "INVALID_INPUT",
            "path": ["realm", 0],
        }))
        .unwrap();
        assert_eq!(error.kind, Some(ErrorKind::InvalidInput));
        assert_eq!(error.path_string().as_deref(), Some("realm.0"));
    }

    #[test]
    fn test_display_of_api_failure_lists_messages() {
        let failure = FetchFailure::api(vec![ApiError::new("first"), ApiError::new("second")]);
        assert_eq!(failure.to_string(), "API returned 2 error(s): first; second");
    }

    #[test]
    fn test_diagnostic_dump() {
        let failure = FetchFailure::server(502, Some("bad gateway".to_string()));
        let dump = failure.diagnostic_dump();
        assert!(dump.starts_with("server error: API returned status 502"));
        assert!(dump.ends_with("bad gateway"));

        let failure = FetchFailure::api(vec![ApiError::new("denied")
            .with_kind(ErrorKind::NotAuthorized)
            .with_key("realm.no-access")]);
        let dump = failure.diagnostic_dump();
        assert!(dump.contains("- denied (kind: NOT_AUTHORIZED, key: realm.no-access)"));

        let failure = FetchFailure::network("connection refused");
        assert_eq!(failure.diagnostic_dump(), failure.to_string());
    }
}
