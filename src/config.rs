//! Client configuration: API root and nonce.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const API_ROOT_ENV: &str = "JETPACK_API_ROOT";
pub const API_NONCE_ENV: &str = "JETPACK_API_NONCE";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing config: env var {var} not set")]
    Missing { var: &'static str },
}

/// Where requests go and which nonce authenticates them.
///
/// `api_root` is used as a raw prefix, so it normally ends with `/`
/// (e.g. `https://example.com/wp-json/`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_root: String,
    pub nonce: String,
}

impl ClientConfig {
    #[must_use]
    pub fn new(api_root: impl Into<String>, nonce: impl Into<String>) -> Self {
        Self { api_root: api_root.into(), nonce: nonce.into() }
    }

    /// Build config from environment variables.
    ///
    /// Required:
    /// - `JETPACK_API_ROOT`
    ///
    /// Optional:
    /// - `JETPACK_API_NONCE`: empty when absent
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if the API root is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_root = lookup(API_ROOT_ENV)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing { var: API_ROOT_ENV })?;
        let nonce = lookup(API_NONCE_ENV).unwrap_or_default();
        Ok(Self { api_root, nonce })
    }
}
