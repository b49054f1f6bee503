//! Configuration model loaded from external sources.

use std::time::Duration;

use config::{Config, ConfigError};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings of the dashboard client.
pub struct DashboardConfig {
    /// Base URL every API path is appended to, e.g. `https://api.noventer.uz/api/v1`.
    pub api_base_url: String,
    /// JSON file holding the persisted credential.
    pub session_file: String,
    /// Per-request timeout; requests wait indefinitely when unset.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl DashboardConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Loads `config/default.yaml`, then `config/{app_env}.yaml` if present, then
/// `APP_*` environment variables.
pub fn load_config(app_env: &str) -> Result<DashboardConfig, ConfigError> {
    Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build()?
        .try_deserialize::<DashboardConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_optional() {
        let config: DashboardConfig = serde_json::from_value(serde_json::json!({
            "api_base_url": "https://api.noventer.uz/api/v1",
            "session_file": "session.json"
        }))
        .unwrap();
        assert_eq!(config.request_timeout(), None);

        let config = DashboardConfig {
            request_timeout_secs: Some(15),
            ..config
        };
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn default_profile_file_loads() {
        let config = Config::builder()
            .add_source(config::File::from_str(
                include_str!("../../config/default.yaml"),
                config::FileFormat::Yaml,
            ))
            .build()
            .unwrap()
            .try_deserialize::<DashboardConfig>()
            .unwrap();
        assert!(config.api_base_url.starts_with("https://"));
    }
}
