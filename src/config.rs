//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Redis
//!
//! Caching is enabled by either a full URL:
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! ```
//!
//! or individual components:
//!
//! ```bash
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! Without either, responses are not cached.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `SONGLINK_API_URL` - Matching API endpoint (default: song.link v1-alpha.1 links)
//! - `DEFAULT_COUNTRY` - Country for lookups without one (default: `US`)
//! - `UPSTREAM_TIMEOUT_SECONDS` - Upstream request timeout (default: client default)
//! - `ALLOWED_ORIGIN_PATTERN` - Regex of allowed browser origins
//! - `ALLOW_LOCALHOST` - Also allow `localhost:` origins (default: `true`)
//! - `CACHE_TTL_SECONDS` - Cache freshness (default: 3600)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::api::middleware::OriginPolicy;
use crate::api::middleware::cors::DEFAULT_ORIGIN_PATTERN;
use crate::domain::entities::DEFAULT_COUNTRY;
use crate::infrastructure::songlink::DEFAULT_ENDPOINT;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub songlink_api_url: String,
    pub default_country: String,
    /// `None` leaves the HTTP client's default timeout in place.
    pub upstream_timeout_seconds: Option<u64>,
    pub allowed_origin_pattern: String,
    pub allow_localhost: bool,
    pub redis_url: Option<String>,
    /// Default TTL (seconds) for cached responses in Redis.
    /// Has no effect when Redis is not configured.
    pub cache_ttl_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let songlink_api_url =
            env::var("SONGLINK_API_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let default_country =
            env::var("DEFAULT_COUNTRY").unwrap_or_else(|_| DEFAULT_COUNTRY.to_string());

        let upstream_timeout_seconds = env::var("UPSTREAM_TIMEOUT_SECONDS")
            .ok()
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("UPSTREAM_TIMEOUT_SECONDS must be a whole number of seconds")?;

        let allowed_origin_pattern = env::var("ALLOWED_ORIGIN_PATTERN")
            .unwrap_or_else(|_| DEFAULT_ORIGIN_PATTERN.to_string());

        let allow_localhost = env::var("ALLOW_LOCALHOST")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(true);

        let redis_url = Self::load_redis_url();

        let cache_ttl_seconds = env::var("CACHE_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            songlink_api_url,
            default_country,
            upstream_timeout_seconds,
            allowed_origin_pattern,
            allow_localhost,
            redis_url,
            cache_ttl_seconds,
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        // Empty password means no authentication
        let url = match env::var("REDIS_PASSWORD") {
            Ok(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        };

        Some(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `songlink_api_url` is not an http(s) URL
    /// - `default_country` is not two ASCII letters
    /// - `allowed_origin_pattern` is not a valid regex
    /// - a timeout or TTL is zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        let api_url = url::Url::parse(&self.songlink_api_url)
            .with_context(|| format!("SONGLINK_API_URL is invalid: '{}'", self.songlink_api_url))?;
        if api_url.scheme() != "http" && api_url.scheme() != "https" {
            anyhow::bail!(
                "SONGLINK_API_URL must use http or https, got '{}'",
                self.songlink_api_url
            );
        }

        if self.default_country.len() != 2
            || !self.default_country.chars().all(|c| c.is_ascii_alphabetic())
        {
            anyhow::bail!(
                "DEFAULT_COUNTRY must be a two-letter country code, got '{}'",
                self.default_country
            );
        }

        if self.upstream_timeout_seconds == Some(0) {
            anyhow::bail!("UPSTREAM_TIMEOUT_SECONDS must be greater than 0");
        }

        OriginPolicy::new(&self.allowed_origin_pattern, self.allow_localhost)
            .context("ALLOWED_ORIGIN_PATTERN is not a valid regex")?;

        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(redis_url)
            );
        }

        if self.cache_ttl_seconds == 0 {
            anyhow::bail!("CACHE_TTL_SECONDS must be greater than 0");
        }

        Ok(())
    }

    pub fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream_timeout_seconds.map(Duration::from_secs)
    }

    /// Builds the origin policy from the configured pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid regex.
    pub fn origin_policy(&self) -> Result<OriginPolicy> {
        OriginPolicy::new(&self.allowed_origin_pattern, self.allow_localhost)
            .context("ALLOWED_ORIGIN_PATTERN is not a valid regex")
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Upstream: {}", self.songlink_api_url);
        tracing::info!("  Default country: {}", self.default_country);

        match self.upstream_timeout_seconds {
            Some(secs) => tracing::info!("  Upstream timeout: {}s", secs),
            None => tracing::info!("  Upstream timeout: client default"),
        }

        tracing::info!(
            "  Allowed origins: {} (localhost: {})",
            self.allowed_origin_pattern,
            self.allow_localhost
        );

        if let Some(ref redis_url) = self.redis_url {
            tracing::info!(
                "  Redis: {} (enabled, TTL {}s)",
                mask_connection_string(redis_url),
                self.cache_ttl_seconds
            );
        } else {
            tracing::info!("  Redis: disabled");
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Masks the password in connection strings for logging.
///
/// `redis://:password@host:port/db` → `redis://:***@host:port/db`
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
