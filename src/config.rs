//! Breach lookup configuration.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

// Environment variable names
pub const ENV_HIBP_URL: &str = "PWD_HIBP_URL";
pub const ENV_HIBP_USER_AGENT: &str = "PWD_HIBP_USER_AGENT";
pub const ENV_HIBP_TIMEOUT_MS: &str = "PWD_HIBP_TIMEOUT_MS";
pub const ENV_HIBP_PADDING: &str = "PWD_HIBP_PADDING";
pub const ENV_CACHE_TTL_SECS: &str = "PWD_CACHE_TTL_SECS";
pub const ENV_CACHE_CAPACITY: &str = "PWD_CACHE_CAPACITY";

// Default values
pub const DEFAULT_HIBP_URL: &str = "https://api.pwnedpasswords.com/range/";
const DEFAULT_TIMEOUT_MS: u64 = 5000;
const DEFAULT_CACHE_TTL_SECS: u64 = 3600; // 1 hour
const DEFAULT_CACHE_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreachConfig {
    /// Range endpoint; the hash prefix is appended to it.
    pub api_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Ask the service to pad responses with zero-count rows.
    pub padding: bool,
    pub cache_ttl: Duration,
    /// Maximum number of prefixes held by the cache.
    pub cache_capacity: usize,
}

impl Default for BreachConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_HIBP_URL.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            padding: true,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl BreachConfig {
    /// Builds the configuration from the environment, falling back to the
    /// defaults for unset variables.
    ///
    /// - `PWD_HIBP_URL` - range endpoint (default: Pwned Passwords)
    /// - `PWD_HIBP_USER_AGENT` - user agent sent with lookups
    /// - `PWD_HIBP_TIMEOUT_MS` - lookup timeout (default: 5000)
    /// - `PWD_HIBP_PADDING` - `true`/`false` (default: true)
    /// - `PWD_CACHE_TTL_SECS` - prefix cache TTL (default: 3600)
    /// - `PWD_CACHE_CAPACITY` - prefix cache size (default: 1024)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_url = env::var(ENV_HIBP_URL).unwrap_or(defaults.api_url);
        let user_agent = env::var(ENV_HIBP_USER_AGENT).unwrap_or(defaults.user_agent);
        let timeout = parse_var::<u64>(ENV_HIBP_TIMEOUT_MS)?
            .map(Duration::from_millis)
            .unwrap_or(defaults.timeout);
        let padding = parse_var::<bool>(ENV_HIBP_PADDING)?.unwrap_or(defaults.padding);
        let cache_ttl = parse_var::<u64>(ENV_CACHE_TTL_SECS)?
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);
        let cache_capacity = parse_var::<usize>(ENV_CACHE_CAPACITY)?.unwrap_or(defaults.cache_capacity);

        if timeout.is_zero() {
            return Err(ConfigError::Invalid {
                key: ENV_HIBP_TIMEOUT_MS,
                value: "0".to_string(),
            });
        }

        Ok(Self {
            api_url,
            user_agent,
            timeout,
            padding,
            cache_ttl,
            cache_capacity,
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(None),
    }
}
