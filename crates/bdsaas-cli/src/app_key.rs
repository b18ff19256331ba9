//! Where the application key comes from.
//!
//! `app_key` in `config.toml` (or `--app-key`) is either the key itself or
//! a reference to it:
//!
//! - `env::VAR_NAME` reads `$VAR_NAME`
//! - `pass::path/in/store` takes the first line of `pass show path/in/store`
//!
//! Whatever the source, surrounding whitespace is stripped and an empty key
//! is rejected before any request is made.

use std::fmt;
use std::process::Command;

use crate::error::{CliError, CliResult};

const ENV_PREFIX: &str = "env::";
const PASS_PREFIX: &str = "pass::";

/// A configured application key, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// The key itself.
    Literal(String),
    /// Name of an environment variable holding the key.
    Env(String),
    /// Entry in the `pass` password store holding the key.
    Pass(String),
}

impl KeySource {
    /// Classifies a configured value by its prefix.
    pub fn parse(value: &str) -> Self {
        if let Some(var) = value.strip_prefix(ENV_PREFIX) {
            Self::Env(var.to_string())
        } else if let Some(entry) = value.strip_prefix(PASS_PREFIX) {
            Self::Pass(entry.to_string())
        } else {
            Self::Literal(value.to_string())
        }
    }

    /// Returns true if the value names a location rather than the key.
    pub fn is_reference(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }

    /// Reads the key from its source.
    ///
    /// Fails with [`CliError::Config`] if the source is unavailable or
    /// yields an empty key.
    pub fn resolve(&self) -> CliResult<String> {
        let raw = match self {
            Self::Literal(key) => key.clone(),
            Self::Env(var) => std::env::var(var).map_err(|_| {
                CliError::Config(format!("environment variable `{}` is not set", var))
            })?,
            Self::Pass(entry) => read_pass_entry(entry)?,
        };
        let key = raw.trim();
        if key.is_empty() {
            return Err(CliError::Config(format!("app_key from {} is empty", self)));
        }
        Ok(key.to_string())
    }
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(_) => write!(f, "config"),
            Self::Env(var) => write!(f, "${}", var),
            Self::Pass(entry) => write!(f, "pass entry `{}`", entry),
        }
    }
}

fn read_pass_entry(entry: &str) -> CliResult<String> {
    let output = Command::new("pass")
        .arg("show")
        .arg(entry)
        .output()
        .map_err(|e| CliError::Config(format!("failed to run `pass show {}`: {}", entry, e)))?;

    if !output.status.success() {
        return Err(CliError::Config(format!(
            "`pass show {}` failed ({}): {}",
            entry,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    // pass keeps the secret on the first line; later lines are metadata.
    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_by_prefix() {
        assert_eq!(
            KeySource::parse("3f9a0c7e21"),
            KeySource::Literal("3f9a0c7e21".into())
        );
        assert_eq!(
            KeySource::parse("env::BDSAAS_APP_KEY"),
            KeySource::Env("BDSAAS_APP_KEY".into())
        );
        assert_eq!(
            KeySource::parse("pass::work/bdsaas"),
            KeySource::Pass("work/bdsaas".into())
        );
        // prefixes are case sensitive
        assert_eq!(
            KeySource::parse("ENV::X"),
            KeySource::Literal("ENV::X".into())
        );
    }

    #[test]
    fn only_literals_are_keys() {
        assert!(!KeySource::parse("abc").is_reference());
        assert!(KeySource::parse("env::A").is_reference());
        assert!(KeySource::parse("pass::a/b").is_reference());
    }

    #[test]
    fn literal_is_trimmed() {
        let key = KeySource::parse("  3f9a0c7e21\n").resolve().unwrap();
        assert_eq!(key, "3f9a0c7e21");
    }

    #[test]
    fn blank_literal_is_rejected() {
        for value in ["", "   ", "\t\n"] {
            let err = KeySource::parse(value).resolve().unwrap_err();
            assert!(matches!(err, CliError::Config(ref msg) if msg.contains("empty")));
        }
    }

    #[test]
    fn env_source_resolves_and_trims() {
        unsafe {
            std::env::set_var("_BDSAAS_KEY_SOURCE_SET", "key-from-env\n");
        }
        let key = KeySource::parse("env::_BDSAAS_KEY_SOURCE_SET")
            .resolve()
            .unwrap();
        assert_eq!(key, "key-from-env");
        unsafe {
            std::env::remove_var("_BDSAAS_KEY_SOURCE_SET");
        }
    }

    #[test]
    fn empty_env_var_is_rejected() {
        unsafe {
            std::env::set_var("_BDSAAS_KEY_SOURCE_BLANK", " ");
        }
        let err = KeySource::parse("env::_BDSAAS_KEY_SOURCE_BLANK")
            .resolve()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration error: app_key from $_BDSAAS_KEY_SOURCE_BLANK is empty"
        );
        unsafe {
            std::env::remove_var("_BDSAAS_KEY_SOURCE_BLANK");
        }
    }

    #[test]
    fn unset_env_var_is_config_error() {
        let err = KeySource::parse("env::_BDSAAS_KEY_SOURCE_UNSET_12345")
            .resolve()
            .unwrap_err();
        assert!(matches!(err, CliError::Config(ref msg) if msg.contains("not set")));
    }

    #[test]
    fn missing_pass_entry_is_config_error() {
        // Fails whether or not `pass` is installed.
        let err = KeySource::parse("pass::nonexistent/bdsaas/entry/12345")
            .resolve()
            .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
