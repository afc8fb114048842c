//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CATALOG_BASE_URL` - Upstream catalog API base URL (default: <https://api.kicks.dev/v3>)
//! - `CATALOG_API_KEY` - Bearer token for the catalog API; requests are sent
//!   without an `Authorization` header when unset
//! - `CATALOG_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)
//! - `CATALOG_LISTING_QUERY` - Search term pinned to the trending listing (default: nike)
//! - `SOLE_SUPPLY_DATA_DIR` - Directory for durable local storage (default: .sole-supply)
//! - `IDENTITY_ENDPOINT` - External identity provider endpoint
//! - `IDENTITY_CLIENT_ID` - OAuth client ID registered with the identity provider
//!   (both identity variables must be set together)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://api.kicks.dev/v3";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LISTING_QUERY: &str = "nike";
const DEFAULT_DATA_DIR: &str = ".sole-supply";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the durable key-value store
    pub data_dir: PathBuf,
    /// Upstream catalog API configuration
    pub catalog: CatalogConfig,
    /// External identity provider configuration, if one is registered
    pub identity: Option<IdentityConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Upstream catalog API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API (e.g., <https://api.kicks.dev/v3>)
    pub base_url: String,
    /// Bearer token; omitted from requests when `None`
    pub api_key: Option<SecretString>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Search term the trending listing is pinned to
    pub listing_query: String,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout", &self.timeout)
            .field("listing_query", &self.listing_query)
            .finish()
    }
}

/// External identity provider configuration.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Provider endpoint (e.g., <https://solesupply.authgear.cloud>)
    pub endpoint: String,
    /// OAuth client ID registered with the provider
    pub client_id: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid (malformed
    /// base URL, non-numeric timeout, or an identity variable set without
    /// its partner).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default(
            "SOLE_SUPPLY_DATA_DIR",
            DEFAULT_DATA_DIR,
        ));
        let catalog = CatalogConfig::from_env()?;
        let identity = IdentityConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            data_dir,
            catalog,
            identity,
            sentry_dsn,
        })
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_env_or_default("CATALOG_BASE_URL", DEFAULT_BASE_URL);
        validate_base_url(&base_url, "CATALOG_BASE_URL")?;

        let timeout_secs = get_env_or_default(
            "CATALOG_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("CATALOG_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            base_url,
            api_key: get_optional_env("CATALOG_API_KEY").map(SecretString::from),
            timeout: Duration::from_secs(timeout_secs),
            listing_query: get_env_or_default("CATALOG_LISTING_QUERY", DEFAULT_LISTING_QUERY),
        })
    }
}

impl IdentityConfig {
    /// Both identity variables must be present for the provider to be
    /// configured; one without the other is a misconfiguration, not a
    /// partial setup.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let endpoint = get_optional_env("IDENTITY_ENDPOINT");
        let client_id = get_optional_env("IDENTITY_CLIENT_ID");

        match (endpoint, client_id) {
            (Some(endpoint), Some(client_id)) => {
                validate_base_url(&endpoint, "IDENTITY_ENDPOINT")?;
                Ok(Some(Self {
                    endpoint,
                    client_id,
                }))
            }
            (None, None) => Ok(None),
            (Some(_), None) => Err(ConfigError::MissingEnvVar(
                "IDENTITY_CLIENT_ID".to_string(),
            )),
            (None, Some(_)) => Err(ConfigError::MissingEnvVar(
                "IDENTITY_ENDPOINT".to_string(),
            )),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a URL parses and uses an http(s) scheme.
fn validate_base_url(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let url = url::Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url_valid() {
        assert!(validate_base_url("https://api.kicks.dev/v3", "TEST_VAR").is_ok());
        assert!(validate_base_url("http://localhost:8080", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_validate_base_url_malformed() {
        let result = validate_base_url("not a url", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_validate_base_url_bad_scheme() {
        let result = validate_base_url("ftp://example.com", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_catalog_config_debug_redacts_api_key() {
        let config = CatalogConfig {
            base_url: "https://api.kicks.dev/v3".to_string(),
            api_key: Some(SecretString::from("kd_super_secret_key")),
            timeout: Duration::from_secs(10),
            listing_query: "nike".to_string(),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("api.kicks.dev"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("kd_super_secret_key"));
    }

    #[test]
    fn test_catalog_config_debug_without_api_key() {
        let config = CatalogConfig {
            base_url: "https://api.kicks.dev/v3".to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
            listing_query: "nike".to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("None"));
    }
}
