//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default upstream API root.
pub const DEFAULT_POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Root URL of the upstream Pokemon API
    pub pokeapi_base_url: String,
    /// Expiry in seconds applied to every cache entry
    pub cache_ttl: u64,
    /// Per-request upstream timeout in seconds
    pub upstream_timeout: u64,
    /// Bearer tokens accepted by the authentication gate
    pub api_tokens: Vec<String>,
    /// Page size used when the caller does not pass `limit`
    pub default_page_limit: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `POKEAPI_BASE_URL` - Upstream API root (default: https://pokeapi.co/api/v2)
    /// - `CACHE_TTL` - Cache entry expiry in seconds (default: 3600)
    /// - `UPSTREAM_TIMEOUT` - Upstream request timeout in seconds (default: 10)
    /// - `API_TOKENS` - Comma-separated bearer tokens (default: none)
    /// - `DEFAULT_PAGE_LIMIT` - Page size when omitted (default: 20)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            pokeapi_base_url: env::var("POKEAPI_BASE_URL")
                .ok()
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.pokeapi_base_url),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.upstream_timeout),
            api_tokens: env::var("API_TOKENS")
                .map(|v| parse_tokens(&v))
                .unwrap_or_default(),
            default_page_limit: parse_var("DEFAULT_PAGE_LIMIT")
                .filter(|limit| *limit > 0)
                .unwrap_or(defaults.default_page_limit),
        }
    }

    /// Cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Upstream timeout as a Duration.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            pokeapi_base_url: DEFAULT_POKEAPI_BASE_URL.to_string(),
            cache_ttl: 3600,
            upstream_timeout: 10,
            api_tokens: Vec::new(),
            default_page_limit: 20,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_tokens(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.pokeapi_base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.upstream_timeout, 10);
        assert!(config.api_tokens.is_empty());
        assert_eq!(config.default_page_limit, 20);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("POKEAPI_BASE_URL");
        env::remove_var("CACHE_TTL");
        env::remove_var("UPSTREAM_TIMEOUT");
        env::remove_var("API_TOKENS");
        env::remove_var("DEFAULT_PAGE_LIMIT");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));
        assert_eq!(config.default_page_limit, 20);
    }

    #[test]
    fn test_parse_tokens_skips_blanks() {
        assert_eq!(parse_tokens(" a, ,b ,"), vec!["a".to_string(), "b".to_string()]);
        assert!(parse_tokens("").is_empty());
    }
}
