//! Init command - create the user config file

use anyhow::Result;
use codeorigin::config::{init_user_config, user_config_path};
use console::style;

/// Run the init command
pub fn run() -> Result<()> {
    let existed = user_config_path().is_some_and(|p| p.exists());
    let config_path = init_user_config()?;

    if existed {
        println!(
            "{} Config already exists at {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    } else {
        println!(
            "{} Created {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    }
    println!(
        "  Project settings can go in {} in the working directory.",
        style(codeorigin::config::PROJECT_CONFIG_FILE).cyan()
    );
    Ok(())
}
