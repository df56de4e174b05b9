use crate::config::types::PortalConfig;
use crate::error::{GraphQlError, Result};
use std::path::Path;

/// Configuration loader trait
pub trait ConfigLoader {
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<PortalConfig>;
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<PortalConfig>;
}

/// Default configuration loader implementation
pub struct DefaultConfigLoader;

impl ConfigLoader for DefaultConfigLoader {
    /// Load configuration from a portal.toml file
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<PortalConfig> {
        let content = std::fs::read_to_string(&path).map_err(|_| GraphQlError::ConfigNotFound {
            path: path.as_ref().to_path_buf(),
        })?;

        let mut config: PortalConfig = toml::from_str(&content)?;
        config.resolve_paths(config_dir(path.as_ref()));
        Ok(config)
    }

    /// Load and validate configuration with file context in errors
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<PortalConfig> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(GraphQlError::ConfigNotFound {
                path: path_ref.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path_ref)?;

        let mut config: PortalConfig = toml::from_str(&content).map_err(|e| {
            GraphQlError::invalid_config(format!(
                "Failed to parse TOML in {}: {}",
                path_ref.display(),
                e
            ))
        })?;

        config.validate()?;
        config.resolve_paths(config_dir(path_ref));
        tracing::debug!(path = %path_ref.display(), endpoint = %config.api.endpoint, "loaded configuration");
        Ok(config)
    }
}

fn config_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

impl PortalConfig {
    /// Load configuration from a portal.toml file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultConfigLoader::load_from_file(path)
    }

    /// Load configuration and validate it
    pub fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultConfigLoader::load_with_validation(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_with_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("portal.toml");
        fs::write(
            &path,
            r#"
[api]
endpoint = "http://127.0.0.1:3080/graphql"
timeout_seconds = 5
headers."Accept-Language" = "de"

[ui]
locale = "de"
"#,
        )
        .unwrap();

        let config = PortalConfig::load_with_validation(&path).unwrap();
        assert_eq!(config.api.timeout_seconds, Some(5));
        assert_eq!(config.locale(), "de");
        assert_eq!(
            config.api.headers.unwrap().get("Accept-Language"),
            Some(&"de".to_string())
        );
    }

    #[test]
    fn test_catalog_is_relative_to_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("portal.toml");
        fs::write(
            &path,
            r#"
[api]
endpoint = "http://127.0.0.1:3080/graphql"

[ui]
catalog = "messages.toml"
"#,
        )
        .unwrap();

        let config = PortalConfig::load_with_validation(&path).unwrap();
        assert_eq!(
            Path::new(config.ui.catalog.as_deref().unwrap()),
            dir.path().join("messages.toml")
        );

        let config = PortalConfig::load_from_file(&path).unwrap();
        assert_eq!(
            Path::new(config.ui.catalog.as_deref().unwrap()),
            dir.path().join("messages.toml")
        );
    }

    #[test]
    fn test_missing_file() {
        let err = PortalConfig::load_with_validation("/nonexistent/portal.toml").unwrap_err();
        assert!(matches!(err, GraphQlError::ConfigNotFound { .. }));

        let err = PortalConfig::load_from_file("/nonexistent/portal.toml").unwrap_err();
        assert!(err.to_string().contains("Configuration file not found"));
    }

    #[test]
    fn test_invalid_toml_mentions_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("portal.toml");
        fs::write(&path, "[api\nendpoint = ").unwrap();

        let err = PortalConfig::load_with_validation(&path).unwrap_err();
        assert!(err.to_string().contains("portal.toml"));
    }
}
