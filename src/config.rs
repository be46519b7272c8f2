//! Configuration loaded from environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Namespace under which the cart is stored.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// What to do when the stored cart cannot be read back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CorruptCartPolicy {
    /// Log, start from an empty cart, and overwrite on the first commit.
    #[default]
    Discard,
    /// Refuse to start.
    Fail,
}

impl FromStr for CorruptCartPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discard" => Ok(Self::Discard),
            "fail" => Ok(Self::Fail),
            other => Err(format!("expected `discard` or `fail`, got `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Key of the cart in the durable store.
    pub storage_key: String,
    /// Directory used by the file-backed store.
    pub storage_dir: PathBuf,
    /// Base URL of the product/stock API.
    pub api_base_url: String,
    pub lookup_timeout: Duration,
    /// Pending requests the cart service buffers.
    pub queue_size: usize,
    pub corrupt_policy: CorruptCartPolicy,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: PathBuf::from(".cart-data"),
            api_base_url: "http://localhost:3333".to_string(),
            lookup_timeout: Duration::from_secs(10),
            queue_size: 32,
            corrupt_policy: CorruptCartPolicy::Discard,
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let queue_size = parse_or("CART_QUEUE_SIZE", &get, defaults.queue_size)?;
        if queue_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CART_QUEUE_SIZE".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            storage_key: get("CART_STORAGE_KEY").unwrap_or(defaults.storage_key),
            storage_dir: get("CART_STORAGE_DIR").map_or(defaults.storage_dir, PathBuf::from),
            api_base_url: get("CART_API_BASE_URL").unwrap_or(defaults.api_base_url),
            lookup_timeout: Duration::from_secs(parse_or(
                "CART_LOOKUP_TIMEOUT_SECS",
                &get,
                defaults.lookup_timeout.as_secs(),
            )?),
            queue_size,
            corrupt_policy: parse_or("CART_CORRUPT_POLICY", &get, defaults.corrupt_policy)?,
        })
    }
}

/// Parse a variable if set, otherwise fall back to `default`.
fn parse_or<T>(key: &str, get: &impl Fn(&str) -> Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    match get(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}
