pub mod loader;
pub mod templates;
pub mod types;

pub use loader::{ConfigLoader, DefaultConfigLoader};
pub use templates::{ensure_config_file_exists, generate_default_config_template};
pub use types::{ApiConfig, PortalConfig, UiConfig};
