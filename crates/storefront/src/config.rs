//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `STOREFRONT_SESSION_DATABASE_URL` - `SQLite` URL for the session store
//!   (default: `sqlite://essence-sessions.db?mode=rwc`)
//! - `STOREFRONT_SIMULATED_LATENCY_MS` - Delay standing in for backend calls (default: 1500)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Fraction of errors sent to Sentry (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Fraction of transactions traced (default: 0.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_SESSION_DATABASE_URL: &str = "sqlite://essence-sessions.db?mode=rwc";
const DEFAULT_SIMULATED_LATENCY_MS: u64 = 1500;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// `SQLite` URL backing the session store (and with it, carts)
    pub session_database_url: String,
    /// Delay applied to simulated checkout, profile and seller submissions
    pub simulated_latency: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced by Sentry
    pub sentry_traces_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            base_url: DEFAULT_BASE_URL.to_string(),
            session_database_url: DEFAULT_SESSION_DATABASE_URL.to_string(),
            simulated_latency: Duration::from_millis(DEFAULT_SIMULATED_LATENCY_MS),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let env = EnvSource(lookup);

        let host = env.parse_or("STOREFRONT_HOST", defaults.host)?;
        let port = env.parse_or("STOREFRONT_PORT", defaults.port)?;
        let base_url = env.get_or("STOREFRONT_BASE_URL", DEFAULT_BASE_URL);
        validate_base_url(&base_url)?;
        let session_database_url =
            env.get_or("STOREFRONT_SESSION_DATABASE_URL", DEFAULT_SESSION_DATABASE_URL);
        let latency_ms =
            env.parse_or("STOREFRONT_SIMULATED_LATENCY_MS", DEFAULT_SIMULATED_LATENCY_MS)?;

        let sentry_sample_rate = env.parse_or("SENTRY_SAMPLE_RATE", defaults.sentry_sample_rate)?;
        let sentry_traces_sample_rate = env.parse_or(
            "SENTRY_TRACES_SAMPLE_RATE",
            defaults.sentry_traces_sample_rate,
        )?;

        Ok(Self {
            host,
            port,
            base_url,
            session_database_url,
            simulated_latency: Duration::from_millis(latency_ms),
            sentry_dsn: env.get("SENTRY_DSN"),
            sentry_environment: env.get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS (controls secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Key lookup with typed accessors.
struct EnvSource<F>(F);

impl<F: Fn(&str) -> Option<String>> EnvSource<F> {
    /// Get an optional variable, treating empty values as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key).map_or(Ok(default), |value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}

/// The base URL must be an absolute http(s) URL with a host.
fn validate_base_url(value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".into(), reason);

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("base_url must have a host".to_string()));
    }
    Ok(())
}
