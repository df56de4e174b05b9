use crate::error::Result;
use std::path::Path;

/// Generate the default portal.toml template
pub fn generate_default_config_template() -> String {
    r#"# Media portal client configuration

[api]
# Full URL of the GraphQL endpoint
endpoint = "http://localhost:3080/graphql"
# Request timeout in seconds
timeout_seconds = 30

# Headers sent with every request (optional)
[api.headers]
"Accept" = "application/json"

[ui]
# Locale of the built-in messages: "en" or "de"
locale = "en"
# Additional message catalog merged over the built-in one (optional)
# catalog = "messages.toml"
"#
    .to_string()
}

/// Write the default configuration if the file does not exist yet, or always
/// when `force` is set. Returns whether a file was written.
pub fn ensure_config_file_exists<P: AsRef<Path>>(path: P, force: bool) -> Result<bool> {
    let path = path.as_ref();
    if path.exists() && !force {
        return Ok(false);
    }

    std::fs::write(path, generate_default_config_template())?;
    Ok(true)
}
