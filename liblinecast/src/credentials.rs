//! Channel access token handling
//!
//! The LINE channel access token is read from the process environment and
//! kept in a [`SecretString`] so it is zeroed on drop and never shows up in
//! `Debug` output or logs.

use secrecy::{ExposeSecret, SecretString};

use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Bearer credential for the LINE Messaging API
pub struct ChannelToken(SecretString);

impl ChannelToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Read the token from the environment variable named in the config
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingCredential` when the variable is unset
    /// or blank.
    pub fn from_env(config: &Config) -> Result<Self> {
        Self::from_var(&config.line.token_env)
    }

    pub fn from_var(var: &str) -> Result<Self> {
        match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => {
                tracing::debug!("Loaded channel access token from {}", var);
                Ok(Self::new(value.trim()))
            }
            _ => Err(ConfigError::MissingCredential {
                var: var.to_string(),
            }
            .into()),
        }
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }
}

impl std::fmt::Debug for ChannelToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ChannelToken([REDACTED])")
    }
}
