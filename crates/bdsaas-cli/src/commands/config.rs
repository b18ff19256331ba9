//! Configuration commands.

use crate::app_key::KeySource;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Dump the effective configuration to stdout, with the key masked.
pub fn dump(config: &CliConfig) -> CliResult<()> {
    let mut shown = config.clone();
    shown.app_key = shown.app_key.as_deref().map(mask_app_key);
    let toml_str = toml::to_string_pretty(&shown)
        .map_err(|e| CliError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", CliConfig::default_path().display());
    println!("{}", toml_str);
    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &CliConfig) -> CliResult<()> {
    config.client_config()?;
    config.resolve_app_key()?;
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path() -> CliResult<()> {
    println!("config: {}", CliConfig::default_path().display());
    Ok(())
}

/// Secret references are shown as-is; literal keys keep only a short tail.
fn mask_app_key(key: &str) -> String {
    if KeySource::parse(key).is_reference() {
        return key.to_string();
    }
    let tail: String = key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if key.chars().count() <= 8 {
        "********".to_string()
    } else {
        format!("********{}", tail)
    }
}
