//! API server configuration.

use std::str::FromStr;
use std::time::Duration;

use mlg_translate::TranslatorConfig;
use serde::Deserialize;

/// Top-level API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Listen address (e.g., "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// PostgreSQL connection URL. In-memory storage when unset.
    pub database_url: Option<String>,
    /// Maximum PostgreSQL pool connections.
    #[serde(default = "default_pool_size")]
    pub database_pool_size: u32,
    /// Per-request timeout applied to every route, in seconds.
    #[serde(default = "default_api_timeout_secs")]
    pub api_timeout_secs: u64,
    /// Upstream translation request timeout, in seconds.
    #[serde(default = "default_translation_timeout_secs")]
    pub translation_timeout_secs: u64,
    /// Base URL of the translation service.
    #[serde(default = "default_translate_base_url")]
    pub translate_base_url: String,
    /// Lifetime of cached translations, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_pool_size() -> u32 {
    5
}

fn default_api_timeout_secs() -> u64 {
    25
}

fn default_translation_timeout_secs() -> u64 {
    8
}

fn default_translate_base_url() -> String {
    TranslatorConfig::default().base_url
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

impl ApiConfig {
    /// Load config from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load config through an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", &lookup, defaults.port),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            database_pool_size: parse_or("DATABASE_POOL_SIZE", &lookup, defaults.database_pool_size),
            api_timeout_secs: parse_or("API_TIMEOUT", &lookup, defaults.api_timeout_secs),
            translation_timeout_secs: parse_or(
                "TRANSLATION_TIMEOUT",
                &lookup,
                defaults.translation_timeout_secs,
            ),
            translate_base_url: lookup("TRANSLATE_BASE_URL").unwrap_or(defaults.translate_base_url),
            cache_ttl_secs: parse_or("CACHE_TTL_SECS", &lookup, defaults.cache_ttl_secs),
        }
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// HTTP translator settings derived from this config.
    pub fn translator_config(&self) -> TranslatorConfig {
        TranslatorConfig {
            base_url: self.translate_base_url.clone(),
            timeout_secs: self.translation_timeout_secs,
            ..TranslatorConfig::default()
        }
    }
}

fn parse_or<T: FromStr>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring unparseable config value");
            default
        }),
        None => default,
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: None,
            database_pool_size: default_pool_size(),
            api_timeout_secs: default_api_timeout_secs(),
            translation_timeout_secs: default_translation_timeout_secs(),
            translate_base_url: default_translate_base_url(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(vars: &[(&str, &str)]) -> ApiConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.database_url.is_none());
        assert_eq!(config.database_pool_size, 5);
        assert_eq!(config.api_timeout(), Duration::from_secs(25));
        assert_eq!(config.translation_timeout_secs, 8);
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn reads_variables() {
        let config = from_map(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/multilingo"),
            ("DATABASE_POOL_SIZE", "12"),
            ("TRANSLATION_TIMEOUT", "3"),
            ("TRANSLATE_BASE_URL", "http://localhost:9999"),
            ("CACHE_TTL_SECS", "60"),
        ]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/multilingo")
        );
        assert_eq!(config.database_pool_size, 12);
        assert_eq!(config.cache_ttl_secs, 60);

        let translator = config.translator_config();
        assert_eq!(translator.base_url, "http://localhost:9999");
        assert_eq!(translator.timeout_secs, 3);
        assert_eq!(translator.max_retries, 2);
    }

    #[test]
    fn bad_values_fall_back_to_defaults() {
        let config = from_map(&[("PORT", "not-a-port"), ("DATABASE_URL", "  ")]);
        assert_eq!(config.port, 3000);
        assert!(config.database_url.is_none());
    }
}
