//! SMS gateway configuration
//!
//! A gateway definition is a flat string-to-string option map supplied by
//! the hosting application (environment, database, or an admin UI). The
//! SNPP provider resolves its options from this map at submission time;
//! which keys a provider understands is published by its
//! [`parameters()`](crate::provider::SmsProvider::parameters) descriptor.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Configuration key names understood by the SNPP provider.
pub mod keys {
    /// Network address of the gateway.
    pub const SMSC_HOST: &str = "SMSC_HOST";
    /// TCP port of the gateway.
    pub const SMSC_PORT: &str = "SMSC_PORT";
    /// Login identity, enables authentication when set.
    pub const USERNAME: &str = "USERNAME";
    /// Login secret.
    pub const PASSWORD: &str = "PASSWORD";
    /// Subject template, supports the `{phone}` and `{otp}` tags.
    pub const SUBJECT: &str = "SUBJECT";
    /// Body template, supports the `{phone}` and `{otp}` tags.
    pub const BODY: &str = "BODY";
    /// Phone number rewrite in `/search/replace/` form.
    pub const REGEXP: &str = "REGEXP";
    /// Gateway network timeout in seconds.
    pub const TIMEOUT: &str = "TIMEOUT";
}

/// Network timeout applied when the `TIMEOUT` option is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A gateway definition: flat option map plus typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SmsGatewayConfig {
    options: HashMap<String, String>,
}

impl SmsGatewayConfig {
    /// Create an empty gateway definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style option setter.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_option(key, value);
        self
    }

    /// Set or replace an option.
    pub fn set_option(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.options.insert(key.into(), value.into());
    }

    /// Look up an option. An empty value counts as absent.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Network timeout for gateway I/O, from the `TIMEOUT` option.
    ///
    /// An unparsable value is logged and replaced by the default.
    pub fn timeout(&self) -> Duration {
        let secs = match self.option(keys::TIMEOUT) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) => secs,
                Err(_) => {
                    warn!(value = %raw, "ignoring unparsable TIMEOUT option");
                    DEFAULT_TIMEOUT_SECS
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };
        Duration::from_secs(secs)
    }

    /// Load a gateway definition from `SNPP_*` environment variables.
    ///
    /// Reads a `.env` file if present. Unset variables leave the
    /// corresponding option absent.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::new();
        for (key, var) in [
            (keys::SMSC_HOST, "SNPP_SMSC_HOST"),
            (keys::SMSC_PORT, "SNPP_SMSC_PORT"),
            (keys::USERNAME, "SNPP_USERNAME"),
            (keys::PASSWORD, "SNPP_PASSWORD"),
            (keys::SUBJECT, "SNPP_SUBJECT"),
            (keys::BODY, "SNPP_BODY"),
            (keys::REGEXP, "SNPP_REGEXP"),
            (keys::TIMEOUT, "SNPP_TIMEOUT"),
        ] {
            if let Ok(value) = std::env::var(var) {
                config.set_option(key, value);
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_option_counts_as_absent() {
        let config = SmsGatewayConfig::new()
            .with_option(keys::SMSC_HOST, "gw.example.com")
            .with_option(keys::SMSC_PORT, "");

        assert_eq!(config.option(keys::SMSC_HOST), Some("gw.example.com"));
        assert_eq!(config.option(keys::SMSC_PORT), None);
        assert_eq!(config.option(keys::USERNAME), None);
    }

    #[test]
    fn timeout_defaults_and_parses() {
        let config = SmsGatewayConfig::new();
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let config = config.with_option(keys::TIMEOUT, "5");
        assert_eq!(config.timeout(), Duration::from_secs(5));

        let config = config.with_option(keys::TIMEOUT, "soon");
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn loads_options_from_env() {
        std::env::set_var("SNPP_SMSC_HOST", "gw.example.com");
        std::env::set_var("SNPP_SMSC_PORT", "444");

        let config = SmsGatewayConfig::from_env();
        assert_eq!(config.option(keys::SMSC_HOST), Some("gw.example.com"));
        assert_eq!(config.option(keys::SMSC_PORT), Some("444"));

        std::env::remove_var("SNPP_SMSC_HOST");
        std::env::remove_var("SNPP_SMSC_PORT");
    }

    #[test]
    fn serializes_as_flat_map() {
        let config = SmsGatewayConfig::new().with_option(keys::SMSC_HOST, "gw");
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"SMSC_HOST":"gw"}"#);
    }
}
