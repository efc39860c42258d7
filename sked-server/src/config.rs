//! Process configuration, read once at startup.

use std::path::PathBuf;
use std::time::Duration;

/// Default upstream timetable system.
const DEFAULT_SKED_URL: &str = "https://stundenplan.ostfalia.de/";

/// Default cache TTL in seconds: 3 hours.
const DEFAULT_CACHE_SECONDS: u64 = 10800;

/// Default listen port.
const DEFAULT_PORT: u16 = 3000;

/// Environment-style configuration for the server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream base URL (`SKED_URL`).
    pub sked_url: String,

    /// Basic-auth username (`SKED_USER`).
    pub sked_user: String,

    /// Basic-auth password (`SKED_PASSWORD`).
    pub sked_password: String,

    /// Cache directory (`CACHE_PATH`); unset keeps the cache in memory.
    pub cache_path: Option<PathBuf>,

    /// Disables caching entirely (`CACHE_DISABLE`, any non-empty value).
    pub cache_disabled: bool,

    /// Cache TTL (`SKED_CACHE_SECONDS`, in seconds).
    pub cache_ttl: Duration,

    /// HTTP listen port (`PORT`).
    pub port: u16,
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            sked_url: var("SKED_URL").unwrap_or_else(|| DEFAULT_SKED_URL.to_string()),
            sked_user: var("SKED_USER").unwrap_or_default(),
            sked_password: var("SKED_PASSWORD").unwrap_or_default(),
            cache_path: var("CACHE_PATH").map(PathBuf::from),
            cache_disabled: var("CACHE_DISABLE").is_some_and(|v| !v.is_empty()),
            cache_ttl: Duration::from_secs(
                var("SKED_CACHE_SECONDS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_CACHE_SECONDS),
            ),
            port: var("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None);

        assert_eq!(config.sked_url, DEFAULT_SKED_URL);
        assert!(config.sked_user.is_empty());
        assert!(config.cache_path.is_none());
        assert!(!config.cache_disabled);
        assert_eq!(config.cache_ttl, Duration::from_secs(10800));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn variables_override_defaults() {
        let config = Config::from_lookup(|name| match name {
            "SKED_URL" => Some("http://localhost:8080/".to_string()),
            "SKED_USER" => Some("user".to_string()),
            "SKED_PASSWORD" => Some("secret".to_string()),
            "CACHE_PATH" => Some("/tmp/sked-cache".to_string()),
            "SKED_CACHE_SECONDS" => Some("60".to_string()),
            "PORT" => Some("8081".to_string()),
            _ => None,
        });

        assert_eq!(config.sked_url, "http://localhost:8080/");
        assert_eq!(config.sked_user, "user");
        assert_eq!(config.cache_path, Some(PathBuf::from("/tmp/sked-cache")));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.port, 8081);
    }

    #[test]
    fn cache_disable_needs_a_nonempty_value() {
        let config = Config::from_lookup(|name| {
            (name == "CACHE_DISABLE").then(|| "1".to_string())
        });
        assert!(config.cache_disabled);

        let config = Config::from_lookup(|name| {
            (name == "CACHE_DISABLE").then(String::new)
        });
        assert!(!config.cache_disabled);
    }

    #[test]
    fn unparseable_numbers_fall_back_to_defaults() {
        let config = Config::from_lookup(|name| {
            (name == "SKED_CACHE_SECONDS").then(|| "soon".to_string())
        });
        assert_eq!(config.cache_ttl, Duration::from_secs(10800));
    }
}
