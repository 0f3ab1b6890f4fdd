//! Config subcommand handlers.

use formpilot_config::{Config, ConfigLoader, ConfigValidator};

use crate::cli::ConfigAction;

/// Handle config subcommands.
pub(crate) fn handle_config_command(
    config: &Config,
    action: ConfigAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Check => config_check(config),
        ConfigAction::Show => {
            print!("{}", ConfigLoader::to_toml(config)?);
            Ok(())
        }
    }
}

fn config_check(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config)?;
    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }
    if !result.is_valid() {
        return Err(format!("{} configuration error(s)", result.errors.len()).into());
    }
    println!("Configuration OK.");
    Ok(())
}
