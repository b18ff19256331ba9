//! CLI configuration.
//!
//! Settings live in `~/.config/bdsaas/config.toml` by default:
//!
//! ```toml
//! app_key = "env::BDSAAS_APP_KEY"
//! base_url = "https://openapi.bdsaas.com"
//! timeout = 30
//! ```
//!
//! `app_key` may reference the key instead of holding it (see
//! [`KeySource`]). Command
//! line flags override the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use bdsaas_client::{Client, ClientConfig};
use serde::{Deserialize, Serialize};

use crate::app_key::KeySource;
use crate::cli::Cli;
use crate::error::{CliError, CliResult};

/// Contents of `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Application key, or a `pass::`/`env::` reference to it.
    pub app_key: Option<String>,

    /// Service origin.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout: u64,

    /// Debug logging.
    pub debug: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            app_key: None,
            base_url: ClientConfig::DEFAULT_BASE_URL.to_string(),
            timeout: ClientConfig::DEFAULT_TIMEOUT_SECS,
            debug: false,
        }
    }
}

impl CliConfig {
    /// Loads configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bdsaas")
            .join("config.toml")
    }

    /// Applies command-line overrides.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(ref key) = cli.app_key {
            self.app_key = Some(key.clone());
        }
        if let Some(ref url) = cli.base_url {
            self.base_url = url.clone();
        }
        if let Some(timeout) = cli.timeout {
            self.timeout = timeout;
        }
        self.debug |= cli.debug;
        self
    }

    /// Resolves the application key from its configured source.
    pub fn resolve_app_key(&self) -> CliResult<String> {
        let raw = self.app_key.as_deref().ok_or_else(|| {
            CliError::Config(format!(
                "no application key configured. Pass --app-key, set BDSAAS_APP_KEY, \
                 or add `app_key = \"...\"` to {}",
                Self::default_path().display()
            ))
        })?;
        KeySource::parse(raw).resolve()
    }

    /// Builds the library configuration.
    pub fn client_config(&self) -> CliResult<ClientConfig> {
        if self.timeout == 0 {
            return Err(CliError::Config("timeout must be at least 1 second".to_string()));
        }
        let config = ClientConfig::default()
            .with_base_url(&self.base_url)
            .map_err(|e| CliError::Config(e.message().to_string()))?
            .with_timeout(Duration::from_secs(self.timeout))
            .with_user_agent(format!("bdsaas-cli/{}", env!("CARGO_PKG_VERSION")));
        Ok(config)
    }

    /// Builds an API client from this configuration.
    pub fn build_client(&self) -> CliResult<Client> {
        let app_key = self.resolve_app_key()?;
        Ok(Client::with_config(app_key, self.client_config()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn defaults_point_at_production() {
        let config = CliConfig::default();
        assert_eq!(config.base_url, "https://openapi.bdsaas.com");
        assert_eq!(config.timeout, 30);
        assert!(config.app_key.is_none());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "app_key = \"abc123\"\nbase_url = \"http://127.0.0.1:9000\"\ntimeout = 5"
        )
        .unwrap();

        let config = CliConfig::load_from(file.path()).unwrap();
        assert_eq!(config.app_key.as_deref(), Some("abc123"));
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout, 5);
        assert!(!config.debug);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config: CliConfig = toml::from_str("app_key = \"k\"\n").unwrap();
        assert_eq!(config.base_url, "https://openapi.bdsaas.com");
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn invalid_file_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout = \"soon\"").unwrap();
        let err = CliConfig::load_from(file.path()).unwrap_err();
        assert!(err.contains("failed to parse config"));
    }

    #[test]
    fn cli_flags_override_file() {
        let cli = Cli::parse_from([
            "bdsaas",
            "--app-key",
            "from-flag",
            "--base-url",
            "http://localhost:8080",
            "--timeout",
            "3",
            "seats",
        ]);
        let config = CliConfig {
            app_key: Some("from-file".to_string()),
            ..Default::default()
        }
        .merge_cli(&cli);
        assert_eq!(config.app_key.as_deref(), Some("from-flag"));
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, 3);
    }

    #[test]
    fn resolve_app_key_env_reference() {
        unsafe {
            std::env::set_var("_BDSAAS_CFG_TEST_KEY", "resolved-key");
        }
        let config = CliConfig {
            app_key: Some("env::_BDSAAS_CFG_TEST_KEY".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_app_key().unwrap(), "resolved-key");
        unsafe {
            std::env::remove_var("_BDSAAS_CFG_TEST_KEY");
        }
    }

    #[test]
    fn missing_app_key_errors() {
        let err = CliConfig::default().resolve_app_key().unwrap_err();
        assert!(err.to_string().contains("no application key"));
    }

    #[test]
    fn blank_app_key_is_rejected_before_building_client() {
        let config = CliConfig {
            app_key: Some("  ".to_string()),
            ..Default::default()
        };
        let err = config.build_client().unwrap_err();
        assert!(matches!(err, CliError::Config(ref msg) if msg.contains("empty")));
    }

    #[test]
    fn client_config_validates() {
        let config = CliConfig {
            base_url: "nope".to_string(),
            ..Default::default()
        };
        assert!(config.client_config().is_err());

        let config = CliConfig {
            timeout: 0,
            ..Default::default()
        };
        assert!(config.client_config().is_err());

        let config = CliConfig {
            timeout: 7,
            ..Default::default()
        };
        let client_config = config.client_config().unwrap();
        assert_eq!(client_config.timeout, Duration::from_secs(7));
        assert!(client_config.user_agent.starts_with("bdsaas-cli/"));
    }
}
