//! Runtime configuration, read once at start-up.
//!
//! Values come from environment variables; a `.env` file in the working directory is
//! honoured for local development.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost/api";
const DEFAULT_STORAGE_URL: &str = "http://localhost/storage";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub storage_url: String,
    /// `RUST_LOG` directives, e.g. `info,reqwest=warn`.
    pub log_filter: String,
    /// Overrides the platform location of the cookie jar.
    pub cookie_jar_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url =
            lookup("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        Url::parse(&api_base_url).map_err(|e| {
            ConfigError::InvalidValue("API_BASE_URL".to_string(), e.to_string())
        })?;

        let storage_url = lookup("STORAGE_URL")
            .unwrap_or_else(|| DEFAULT_STORAGE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());
        EnvFilter::try_new(&log_filter)
            .map_err(|e| ConfigError::InvalidValue("RUST_LOG".to_string(), e.to_string()))?;

        let cookie_jar_path = lookup("COOKIE_JAR_PATH").map(PathBuf::from);

        Ok(Self {
            api_base_url,
            storage_url,
            log_filter,
            cookie_jar_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_point_at_localhost() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_base_url, "http://localhost/api");
        assert_eq!(config.storage_url, "http://localhost/storage");
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.cookie_jar_path, None);
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("API_BASE_URL", "https://api.ezzydrive.ug/api"),
            ("STORAGE_URL", "https://cdn.ezzydrive.ug/storage/"),
            ("RUST_LOG", "debug"),
            ("COOKIE_JAR_PATH", "/tmp/jar.json"),
        ])
        .unwrap();
        assert_eq!(config.api_base_url, "https://api.ezzydrive.ug/api");
        assert_eq!(config.storage_url, "https://cdn.ezzydrive.ug/storage");
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.cookie_jar_path, Some(PathBuf::from("/tmp/jar.json")));
    }

    #[test]
    fn log_filter_accepts_per_target_directives() {
        let config = config_from(&[("RUST_LOG", "info,reqwest=warn,ezzydrive=debug")]).unwrap();
        assert_eq!(config.log_filter, "info,reqwest=warn,ezzydrive=debug");
    }

    #[test]
    fn bad_values_are_reported() {
        assert!(matches!(
            config_from(&[("API_BASE_URL", "localhost")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "API_BASE_URL"
        ));
        assert!(matches!(
            config_from(&[("RUST_LOG", "reqwest=chatty")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "RUST_LOG"
        ));
    }
}
