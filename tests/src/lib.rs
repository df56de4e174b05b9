//! Shared helpers for the portal integration tests.

use graphql::{GraphQlClient, PortalConfig};
use std::fs;
use std::path::{Path, PathBuf};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GRAPHQL_PATH: &str = "/graphql";

/// Write a portal.toml pointing at `endpoint` into `dir`.
pub fn write_config(dir: &Path, endpoint: &str, locale: &str) -> std::io::Result<PathBuf> {
    let content = format!(
        r#"[api]
endpoint = "{endpoint}"
timeout_seconds = 5
headers."X-Portal-Test" = "yes"

[ui]
locale = "{locale}"
"#
    );
    let config_path = dir.join("portal.toml");
    fs::write(&config_path, content)?;
    Ok(config_path)
}

/// Start a mock GraphQL server answering every POST with `response`.
pub async fn mock_graphql(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("content-type", "application/json"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

pub fn endpoint(server: &MockServer) -> String {
    format!("{}{}", server.uri(), GRAPHQL_PATH)
}

pub fn client_for(server: &MockServer) -> GraphQlClient {
    let mut config = PortalConfig::with_endpoint(endpoint(server));
    config.api.timeout_seconds = Some(5);
    GraphQlClient::new(&config).expect("valid test configuration")
}
