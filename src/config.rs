//! Client configuration loaded from environment variables.
//!
//! Values are read once at startup; a `.env` file is honoured for local
//! development.

use std::env;

/// Default API origin for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Path prefix for admin-only routes.
pub const DEFAULT_ADMIN_PATH_PREFIX: &str = "/admin";

/// How the backend encodes incident descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DescriptionEncoding {
    /// Descriptions arrive base64-encoded UTF-8.
    #[default]
    Base64,
    /// Descriptions arrive as plain text.
    Plain,
}

impl std::str::FromStr for DescriptionEncoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base64" => Ok(Self::Base64),
            "plain" => Ok(Self::Plain),
            other => Err(ConfigError::Invalid {
                var: "INCIDENT_DESCRIPTION_ENCODING",
                value: other.to_string(),
            }),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// REST API origin (no trailing slash)
    pub api_url: String,
    /// Routes under this prefix require an admin session
    pub admin_path_prefix: String,
    /// Incident description wire encoding
    pub description_encoding: DescriptionEncoding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            admin_path_prefix: DEFAULT_ADMIN_PATH_PREFIX.to_string(),
            description_encoding: DescriptionEncoding::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("API_URL")
            .or_else(|| lookup("VITE_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let description_encoding = match lookup("INCIDENT_DESCRIPTION_ENCODING") {
            Some(value) => value.parse()?,
            None => DescriptionEncoding::default(),
        };

        Ok(Self {
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            admin_path_prefix: lookup("ADMIN_PATH_PREFIX")
                .unwrap_or_else(|| DEFAULT_ADMIN_PATH_PREFIX.to_string()),
            description_encoding,
        })
    }

    /// Config pointing at a specific API origin (tests, embedding).
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}
