//! Storefront client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LUMEN_API_URL` - Base URL of the backend API (e.g., `https://lumen.shop/api/`)
//!
//! ## Optional
//! - `LUMEN_STATIC_URL` - Base URL for product images (default: `<api origin>/images/products/`)
//! - `LUMEN_ACCESS_TOKEN` - Access token of a signed-in customer; its presence
//!   marks the session authenticated
//! - `LUMEN_HTTP_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STATIC_PATH: &str = "/images/products/";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront client configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Backend API base URL, always ending in `/`
    pub api_url: Url,
    /// Base URL that product image names are resolved against
    pub static_url: Url,
    /// Customer access token, sent as `x-auth`
    pub access_token: Option<SecretString>,
    /// Per-request HTTP timeout
    pub http_timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("api_url", &self.api_url.as_str())
            .field("static_url", &self.static_url.as_str())
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("http_timeout", &self.http_timeout)
            .field("sentry_dsn", &self.sentry_dsn)
            .field("sentry_environment", &self.sentry_environment)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid, or
    /// if the access token looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_base_url("LUMEN_API_URL", &get_required_env("LUMEN_API_URL")?)?;
        let static_url = match get_optional_env("LUMEN_STATIC_URL") {
            Some(value) => parse_base_url("LUMEN_STATIC_URL", &value)?,
            None => default_static_url(&api_url)?,
        };

        let access_token = match get_optional_env("LUMEN_ACCESS_TOKEN") {
            Some(token) if !token.trim().is_empty() => {
                validate_not_placeholder(&token, "LUMEN_ACCESS_TOKEN")?;
                Some(SecretString::from(token))
            }
            _ => None,
        };

        let timeout_secs = get_optional_env("LUMEN_HTTP_TIMEOUT_SECS")
            .map(|value| {
                value.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("LUMEN_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_url,
            static_url,
            access_token,
            http_timeout: Duration::from_secs(timeout_secs),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration for a backend at `api_url` with defaults for everything
    /// else.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `api_url` is not an absolute URL.
    pub fn for_api(api_url: &str) -> Result<Self, ConfigError> {
        let api_url = parse_base_url("LUMEN_API_URL", api_url)?;
        let static_url = default_static_url(&api_url)?;
        Ok(Self {
            api_url,
            static_url,
            access_token: None,
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            sentry_dsn: None,
            sentry_environment: None,
        })
    }

    /// Whether a customer access token is configured.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// The access token, if any, for use in request headers.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_ref().map(|token| token.expose_secret())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parse a base URL, forcing a trailing slash so relative joins append
/// instead of replacing the last segment.
fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let normalized = if value.ends_with('/') {
        value.to_string()
    } else {
        format!("{value}/")
    };
    let url = Url::parse(&normalized)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be an absolute http(s) URL".to_string(),
        ));
    }
    Ok(url)
}

/// Static assets are served from the API host's origin.
fn default_static_url(api_url: &Url) -> Result<Url, ConfigError> {
    api_url
        .join(DEFAULT_STATIC_PATH)
        .map_err(|e| ConfigError::InvalidEnvVar("LUMEN_STATIC_URL".to_string(), e.to_string()))
}

/// Validate that a secret is not a placeholder copied from documentation.
fn validate_not_placeholder(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_appends_slash() {
        let url = parse_base_url("TEST", "https://lumen.shop/api").unwrap();
        assert_eq!(url.as_str(), "https://lumen.shop/api/");
        assert_eq!(url.join("cart").unwrap().as_str(), "https://lumen.shop/api/cart");
    }

    #[test]
    fn test_parse_base_url_rejects_relative() {
        let result = parse_base_url("TEST", "api/v1");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_default_static_url_uses_origin() {
        let config = StorefrontConfig::for_api("http://localhost:3000/api/").unwrap();
        assert_eq!(
            config.static_url.as_str(),
            "http://localhost:3000/images/products/"
        );
        assert!(!config.is_authenticated());
    }

    #[test]
    fn test_placeholder_token_rejected() {
        let result = validate_not_placeholder("your-token-here", "LUMEN_ACCESS_TOKEN");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
        assert!(validate_not_placeholder("eyJhbGciOiJIUzI1NiJ9.e30.sig", "T").is_ok());
    }

    #[test]
    fn test_debug_redacts_token() {
        let mut config = StorefrontConfig::for_api("http://localhost:3000/api/").unwrap();
        config.access_token = Some(SecretString::from("super_secret_access_token"));

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("localhost:3000"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_access_token"));
        assert_eq!(config.access_token(), Some("super_secret_access_token"));
    }
}
