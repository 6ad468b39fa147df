//! rapidmq-dash.toml configuration parser.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ClusterPanel, HealthPanel};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "rapidmq-dash.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub backend: BackendConfig,
    pub metrics: MetricsConfig,
    pub panels: PanelsConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the queue service, e.g. `http://127.0.0.1:8080`.
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub path: String,
    pub interval_ms: u64,
    /// Expected metric names, in dashboard slot order.
    pub names: Vec<String>,
    /// Display labels, paired index-for-index with `names`.
    pub labels: Vec<String>,
    /// Value bound to a slot whose metric is absent from the payload.
    pub missing_value: f64,
    /// Skip a tick while the previous fetch is still in flight.
    pub single_flight: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelsConfig {
    pub health: HealthPanel,
    pub cluster: ClusterPanel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            path: "/metrics".to_string(),
            interval_ms: 5000,
            names: vec![
                "messages_published".to_string(),
                "messages_consumed".to_string(),
                "queue_count".to_string(),
                "total_messages".to_string(),
            ],
            labels: vec![
                "Messages Published".to_string(),
                "Messages Consumed".to_string(),
                "Queue Count".to_string(),
                "Total Messages".to_string(),
            ],
            missing_value: 0.0,
            single_flight: false,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl MetricsConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl DashConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: DashConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.is_file() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.metrics.interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "metrics.interval_ms must be greater than zero".to_string(),
            ));
        }
        if !self.metrics.labels.is_empty() && self.metrics.labels.len() != self.metrics.names.len() {
            return Err(ConfigError::Invalid(format!(
                "metrics.labels has {} entries but metrics.names has {}",
                self.metrics.labels.len(),
                self.metrics.names.len()
            )));
        }
        if !self.metrics.path.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "metrics.path must start with '/': {}",
                self.metrics.path
            )));
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config: DashConfig = toml::from_str("").unwrap();
        assert_eq!(config, DashConfig::default());
        assert_eq!(config.metrics.names.len(), 4);
        assert_eq!(config.metrics.interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_parse_partial() {
        let toml_str = r#"
[backend]
base_url = "http://mq.internal:9000"

[metrics]
interval_ms = 250
names = ["queue_count"]
labels = ["Queues"]
single_flight = true

[panels.cluster]
active_nodes = 3
inactive_nodes = 0
"#;
        let config: DashConfig = toml::from_str(toml_str).unwrap();
        config.validate().unwrap();
        assert_eq!(config.backend.base_url, "http://mq.internal:9000");
        assert_eq!(config.metrics.path, "/metrics");
        assert!(config.metrics.single_flight);
        assert_eq!(config.panels.cluster.active_nodes, 3);
        assert_eq!(config.panels.health, HealthPanel::default());
    }

    #[test]
    fn test_mismatched_labels_rejected() {
        let mut config = DashConfig::default();
        config.metrics.labels.pop();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = DashConfig::default();
        config.metrics.interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_roundtrip_toml() {
        let toml_str = DashConfig::default().to_toml_string().unwrap();
        assert!(toml_str.contains("base_url"));
        let back: DashConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back, DashConfig::default());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = DashConfig::load_or_default(Path::new("/nonexistent/rapidmq-dash.toml")).unwrap();
        assert_eq!(config, DashConfig::default());
    }
}
