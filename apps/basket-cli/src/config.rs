//! CLI configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Command-line flags override whatever is loaded here.

use std::env;
use std::str::FromStr;

use serde::Serialize;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Aligned, human-readable columns
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(()),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CliConfig {
    /// Display name given to the cart (`BASKET_CART_NAME`)
    pub cart_name: String,

    /// Output format (`BASKET_OUTPUT`)
    pub output: OutputFormat,

    /// Debug-level logging (`BASKET_VERBOSE`)
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            cart_name: "default".to_string(),
            output: OutputFormat::Text,
            verbose: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn load_from<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CliConfig::default();

        let cart_name = lookup("BASKET_CART_NAME").unwrap_or(defaults.cart_name);

        let output = match lookup("BASKET_OUTPUT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BASKET_OUTPUT".to_string()))?,
            None => defaults.output,
        };

        let verbose = match lookup("BASKET_VERBOSE") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| ConfigError::InvalidValue("BASKET_VERBOSE".to_string()))?,
            None => defaults.verbose,
        };

        if cart_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue("BASKET_CART_NAME".to_string()));
        }

        Ok(CliConfig {
            cart_name,
            output,
            verbose,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = CliConfig::load_from(lookup(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = CliConfig::load_from(lookup(&[
            ("BASKET_CART_NAME", "lane-3"),
            ("BASKET_OUTPUT", "JSON"),
            ("BASKET_VERBOSE", "yes"),
        ]))
        .unwrap();

        assert_eq!(config.cart_name, "lane-3");
        assert_eq!(config.output, OutputFormat::Json);
        assert!(config.verbose);
    }

    #[test]
    fn test_invalid_output_is_rejected() {
        let err = CliConfig::load_from(lookup(&[("BASKET_OUTPUT", "xml")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for BASKET_OUTPUT");
    }

    #[test]
    fn test_invalid_verbose_is_rejected() {
        let err = CliConfig::load_from(lookup(&[("BASKET_VERBOSE", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref var) if var == "BASKET_VERBOSE"));
    }

    #[test]
    fn test_blank_cart_name_is_rejected() {
        assert!(CliConfig::load_from(lookup(&[("BASKET_CART_NAME", "  ")])).is_err());
    }
}
