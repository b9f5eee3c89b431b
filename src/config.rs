use std::path::PathBuf;
use std::time::Duration;

use crate::common::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the remote REST API, without trailing slash.
    pub api_base_url: String,
    pub bind_addr: String,
    pub static_dir: PathBuf,
    pub pkg_dir: PathBuf,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            static_dir: PathBuf::from("./static"),
            pkg_dir: PathBuf::from("./pkg"),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Reads `PAGECRAFT_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(url) = get("PAGECRAFT_API_URL") {
            config.api_base_url = normalize_base_url(&url).ok_or(ConfigError::Invalid {
                key: "PAGECRAFT_API_URL",
                value: url,
            })?;
        }

        if let Some(addr) = get("PAGECRAFT_BIND_ADDR") {
            config.bind_addr = addr;
        }

        if let Some(dir) = get("PAGECRAFT_STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }

        if let Some(dir) = get("PAGECRAFT_PKG_DIR") {
            config.pkg_dir = PathBuf::from(dir);
        }

        if let Some(secs) = get("PAGECRAFT_REQUEST_TIMEOUT_SECS") {
            let parsed = secs
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::Invalid {
                    key: "PAGECRAFT_REQUEST_TIMEOUT_SECS",
                    value: secs,
                })?;
            config.request_timeout = Duration::from_secs(parsed);
        }

        Ok(config)
    }
}

/// Accepts only http(s) URLs and strips trailing slashes.
pub fn normalize_base_url(url: &str) -> Option<String> {
    let url = url.trim().trim_end_matches('/');
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;

    if rest.is_empty() {
        return None;
    }

    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PAGECRAFT_API_URL", "https://api.example.com/api/"),
            ("PAGECRAFT_REQUEST_TIMEOUT_SECS", "3"),
            ("PAGECRAFT_BIND_ADDR", "127.0.0.1:9000"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "https://api.example.com/api");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
    }

    #[test]
    fn rejects_invalid_values() {
        let err = AppConfig::from_lookup(lookup(&[("PAGECRAFT_API_URL", "ftp://nope")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PAGECRAFT_API_URL", .. }));

        let err =
            AppConfig::from_lookup(lookup(&[("PAGECRAFT_REQUEST_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { key: "PAGECRAFT_REQUEST_TIMEOUT_SECS", .. }
        ));
    }
}
