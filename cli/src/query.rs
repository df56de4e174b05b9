use crate::error::{CliError, Result};
use crate::progress::RequestSpinner;
use crate::ui;
use boundary::{Catalog, EmbedBoundary, PageBoundary, Rendered, Router, Translator};
use graphql::{GraphQlClient, PortalConfig};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use tokio::runtime::Runtime;

#[derive(Debug, Clone)]
pub struct QueryArgs {
    pub file: String,
    pub variables: String,
    pub config_path: String,
    pub route: String,
    pub embed: bool,
    pub locale: Option<String>,
}

/// Run the query. Returns `true` if the error page was shown instead of data.
pub fn execute(args: QueryArgs) -> Result<bool> {
    let rt = Runtime::new()
        .map_err(|e| CliError::Other(format!("Failed to create async runtime: {}", e)))?;

    rt.block_on(execute_async(args))
}

async fn execute_async(args: QueryArgs) -> Result<bool> {
    let config = PortalConfig::load_with_validation(&args.config_path)?;

    let query_path = Path::new(&args.file);
    if !query_path.exists() {
        return Err(CliError::QueryNotFound(query_path.to_path_buf()));
    }
    let document = fs::read_to_string(query_path)?;
    let variables = parse_variables(&args.variables)?;

    let locale = args.locale.as_deref().unwrap_or(config.locale());
    tracing::debug!(
        config = %args.config_path,
        endpoint = %config.api.endpoint,
        locale,
        catalog = ?config.ui.catalog,
        "query configuration loaded"
    );
    let translator: Rc<dyn Translator> = Rc::new(load_catalog(locale, config.ui.catalog.as_deref())?);
    let client = GraphQlClient::new(&config)?;
    let router = Router::new(args.route.clone());

    let spinner = RequestSpinner::start(format!("Querying {}", client.endpoint()));
    let fetch = client.query_value(&document, variables);

    let shown_fallback = if args.embed {
        let boundary = EmbedBoundary::embed(Some(&router), translator)?;
        let rendered = boundary.render_async(fetch).await;
        spinner.finish();
        match rendered? {
            Rendered::Content(data) => print_data(&data)?,
            Rendered::Fallback(placeholder) => ui::embed_placeholder(&placeholder),
        }
        boundary.has_error()
    } else {
        let boundary = PageBoundary::page(Some(&router), translator)?;
        let rendered = boundary.render_async(fetch).await;
        spinner.finish();
        match rendered? {
            Rendered::Content(data) => print_data(&data)?,
            Rendered::Fallback(page) => ui::error_page(&page),
        }
        boundary.has_error()
    };

    tracing::debug!(route = %router.current_path(), embed = args.embed, shown_fallback, "query rendered");
    Ok(shown_fallback)
}

fn parse_variables(raw: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(raw)?;
    if !value.is_object() && !value.is_null() {
        return Err(CliError::Other(
            "Query variables must be a JSON object".to_string(),
        ));
    }
    Ok(value)
}

fn load_catalog(locale: &str, extra: Option<&str>) -> Result<Catalog> {
    let catalog = Catalog::builtin(locale)?;
    match extra {
        Some(path) => {
            let overrides = Catalog::load_from_file(locale, path)?;
            Ok(catalog.merged_with(overrides))
        }
        None => Ok(catalog),
    }
}

fn print_data(data: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variables() {
        assert_eq!(parse_variables("{\"id\": \"ev1\"}").unwrap()["id"], "ev1");
        assert!(parse_variables("null").unwrap().is_null());
        assert!(parse_variables("[1, 2]").is_err());
        assert!(matches!(parse_variables("{"), Err(CliError::JsonParseError(_))));
    }

    #[test]
    fn test_load_catalog_with_override() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("messages.toml");
        std::fs::write(&path, "invalid-input = \"Nope.\"").unwrap();

        let catalog = load_catalog("de", Some(path.to_str().unwrap())).unwrap();
        assert_eq!(catalog.t("invalid-input"), "Nope.");
        assert_eq!(catalog.locale(), "de");

        assert!(load_catalog("xx", None).is_err());
    }

    #[test]
    fn test_missing_config_is_reported() {
        let args = QueryArgs {
            file: "query.graphql".to_string(),
            variables: "{}".to_string(),
            config_path: "/nonexistent/portal.toml".to_string(),
            route: "/".to_string(),
            embed: false,
            locale: None,
        };
        assert!(matches!(execute(args), Err(CliError::GraphQl(_))));
    }
}
