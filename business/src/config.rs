use std::env::vars;

use serde::Deserialize;
use thiserror::Error;
use ustr::Ustr;

/// Used when `PORTAL_API_BASE_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration from environment: {0}")]
    Env(#[from] serde_env::Error),
    #[error("PORTAL_API_BASE_URL must be an http(s) URL, got {0:?}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub api_base_url: String,
    /// Bearer token attached to portal API calls when present.
    pub access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    portal_api_base_url: Option<String>,
    portal_access_token: Option<String>,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            access_token: None,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Reads `PORTAL_API_BASE_URL` and `PORTAL_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(vars())
    }

    pub fn from_vars<S>(iter: impl IntoIterator<Item = (S, S)>) -> Result<Self, ConfigError>
    where
        S: AsRef<str>,
    {
        let raw: RawConfig = serde_env::from_iter(iter)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let api_base_url = raw
            .portal_api_base_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());

        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(api_base_url));
        }

        Ok(Self {
            api_base_url,
            access_token: raw.portal_access_token.filter(|token| !token.is_empty()),
        })
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Endpoint of the create-user operation.
    pub fn users_create_url(&self) -> Ustr {
        Ustr::from(&format!(
            "{}/users/create",
            self.api_base_url.trim_end_matches('/')
        ))
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
