use crate::error::Result;
use crate::ui;
use dialoguer::{theme::ColorfulTheme, Confirm};
use graphql::config::ensure_config_file_exists;
use std::path::Path;

pub fn execute(config_path: String, force: bool) -> Result<()> {
    let path = Path::new(&config_path);
    ui::section_header("Portal Configuration Setup");

    let overwrite = if path.exists() && !force {
        ui::warning_message(&format!("{} already exists", path.display()));
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Overwrite it with the default configuration?")
            .default(false)
            .interact()?
    } else {
        force
    };

    if ensure_config_file_exists(path, overwrite)? {
        ui::success_message(&format!("Created {}", path.display()));
        ui::info_message("Set api.endpoint to the GraphQL endpoint of your portal");
    } else {
        ui::info_message("Keeping the existing configuration");
    }

    Ok(())
}
