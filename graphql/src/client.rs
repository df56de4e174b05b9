//! GraphQL client for the portal API.
//!
//! Every failed query ends in exactly one [`FetchFailure`] variant, so pages can
//! render through an error boundary without inspecting transport details.

use crate::config::PortalConfig;
use crate::error::{GraphQlError, Result};
use boundary::{ApiError, ErrorKind, FetchFailure};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Body of a GraphQL request
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: Value,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<RawError>>,
}

#[derive(Debug, Deserialize)]
struct RawError {
    message: String,
    #[serde(default)]
    path: Option<Vec<Value>>,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    extensions: Option<Extensions>,
}

#[derive(Debug, Default, Deserialize)]
struct Extensions {
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    key: Option<String>,
}

impl From<RawError> for ApiError {
    fn from(raw: RawError) -> Self {
        let extensions = raw.extensions.unwrap_or_default();
        let kind = extensions
            .kind
            .as_deref()
            .or(raw.kind.as_deref())
            .and_then(ErrorKind::from_code);

        ApiError {
            message: raw.message,
            path: raw.path,
            kind,
            key: extensions.key,
        }
    }
}

/// HTTP client sending GraphQL documents to one endpoint
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    endpoint: Url,
    http: Client,
}

impl GraphQlClient {
    /// Create a client from validated configuration
    pub fn new(config: &PortalConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        if let Some(configured) = &config.api.headers {
            for (name, value) in configured {
                let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                    GraphQlError::invalid_config(format!("Invalid header name: {name}"))
                })?;
                let value = HeaderValue::from_str(value).map_err(|_| {
                    GraphQlError::invalid_config(format!("Invalid value for header {name}"))
                })?;
                headers.insert(name, value);
            }
        }

        let http = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            endpoint: config.endpoint_url()?,
            http,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Run `document` and deserialize its `data` into `T`.
    pub async fn query<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: Value,
    ) -> std::result::Result<T, FetchFailure> {
        let request = GraphQlRequest {
            query: document,
            variables,
        };
        tracing::debug!(endpoint = %self.endpoint, "sending GraphQL request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "GraphQL request failed before a response arrived");
                FetchFailure::network(describe_transport_error(&e))
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchFailure::network(format!("failed to read response body: {e}")))?;
        tracing::trace!(status, body = %body, "received GraphQL response");

        parse_response(status, body)
    }

    /// Run `document` and return its raw `data`.
    pub async fn query_value(
        &self,
        document: &str,
        variables: Value,
    ) -> std::result::Result<Value, FetchFailure> {
        self.query(document, variables).await
    }
}

fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out: {error}")
    } else if error.is_connect() {
        format!("could not connect: {error}")
    } else {
        error.to_string()
    }
}

/// Map a received response onto data or a fetch failure.
pub fn parse_response<T: DeserializeOwned>(
    status: u16,
    body: String,
) -> std::result::Result<T, FetchFailure> {
    if !(200..300).contains(&status) {
        let body = (!body.is_empty()).then_some(body);
        return Err(FetchFailure::server(status, body));
    }

    let envelope: Envelope = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(e) => return Err(FetchFailure::not_json(body, e.to_string())),
    };

    if let Some(errors) = envelope.errors {
        return Err(FetchFailure::api(errors.into_iter().map(ApiError::from).collect()));
    }

    let Some(data) = envelope.data else {
        return Err(FetchFailure::not_json(body, "response contains neither data nor errors"));
    };

    serde_json::from_value(data)
        .map_err(|e| FetchFailure::not_json(body, format!("unexpected data shape: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct CurrentUser {
        current_user: Option<Value>,
    }

    #[test]
    fn test_success_deserializes_data() {
        let body = json!({ "data": { "currentUser": null } }).to_string();
        let data: CurrentUser = parse_response(200, body).unwrap();
        assert_eq!(data, CurrentUser { current_user: None });
    }

    #[test]
    fn test_non_success_status_is_server_error() {
        let err = parse_response::<Value>(502, "Bad Gateway".to_string()).unwrap_err();
        assert_eq!(err, FetchFailure::server(502, Some("Bad Gateway".to_string())));

        let err = parse_response::<Value>(500, String::new()).unwrap_err();
        assert_eq!(err, FetchFailure::server(500, None));
    }

    #[test]
    fn test_html_body_is_not_json() {
        let err = parse_response::<Value>(200, "<html>oops</html>".to_string()).unwrap_err();
        assert!(matches!(err, FetchFailure::NotJson { ref body, .. } if body == "<html>oops</html>"));
    }

    #[test]
    fn test_empty_envelope_is_not_json() {
        let err = parse_response::<Value>(200, "{}".to_string()).unwrap_err();
        assert!(matches!(err, FetchFailure::NotJson { ref detail, .. } if detail.contains("neither data nor errors")));
    }

    #[test]
    fn test_wrong_data_shape_is_not_json() {
        let body = json!({ "data": { "currentUser": 5 } }).to_string();
        let err = parse_response::<Vec<String>>(200, body).unwrap_err();
        assert!(matches!(err, FetchFailure::NotJson { .. }));
    }

    #[test]
    fn test_errors_become_api_failure() {
        let body = json!({
            "data": null,
            "errors": [
                { "message": "denied", "path": ["realm"], "extensions": { "kind": "NOT_AUTHORIZED", "key": "realm.no-access" } },
                { "message": "bad id", "kind": "INVALID_INPUT" },
                { "message": "who knows", "extensions": { "kind": "TEAPOT" } },
            ],
        })
        .to_string();

        let err = parse_response::<Value>(200, body).unwrap_err();
        let FetchFailure::Api { errors } = err else {
            panic!("expected an API failure");
        };

        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].kind, Some(ErrorKind::NotAuthorized));
        assert_eq!(errors[0].key.as_deref(), Some("realm.no-access"));
        assert_eq!(errors[0].path, Some(vec![json!("realm")]));
        assert_eq!(errors[1].kind, Some(ErrorKind::InvalidInput));
        assert_eq!(errors[2].kind, None);
    }

    #[test]
    fn test_empty_error_list_is_still_api_failure() {
        let body = json!({ "errors": [] }).to_string();
        let err = parse_response::<Value>(200, body).unwrap_err();
        assert_eq!(err, FetchFailure::api(vec![]));
    }

    #[test]
    fn test_client_requires_valid_config() {
        let config = PortalConfig::with_endpoint("localhost");
        assert!(GraphQlClient::new(&config).is_err());

        let config = PortalConfig::with_endpoint("http://localhost:3080/graphql");
        let client = GraphQlClient::new(&config).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:3080/graphql");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Nothing listens on the discard port.
        let mut config = PortalConfig::with_endpoint("http://127.0.0.1:9/graphql");
        config.api.timeout_seconds = Some(2);
        let client = GraphQlClient::new(&config).unwrap();

        let err = client.query_value("{ currentUser { username } }", Value::Null).await.unwrap_err();
        assert!(matches!(err, FetchFailure::Network { .. }));
    }
}
