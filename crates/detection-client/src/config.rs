use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

pub const ENV_API_URL: &str = "PHISHSCOPE_API_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "PHISHSCOPE_REQUEST_TIMEOUT_SECS";
pub const ENV_CONNECT_TIMEOUT: &str = "PHISHSCOPE_CONNECT_TIMEOUT_SECS";

/// Where the fingerprint and detection endpoints live and how long to wait on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL serving `/fingerprint` and `/detect`
    pub base_url: String,
    /// Whole-request deadline; exceeding it fails the phase
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Defaults overlaid with `PHISHSCOPE_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(secs) = parse_secs(ENV_REQUEST_TIMEOUT, lookup(ENV_REQUEST_TIMEOUT)) {
            self.request_timeout_secs = secs;
        }
        if let Some(secs) = parse_secs(ENV_CONNECT_TIMEOUT, lookup(ENV_CONNECT_TIMEOUT)) {
            self.connect_timeout_secs = secs;
        }
        self
    }

    /// Read config from a JSON file, using defaults when absent or malformed.
    pub async fn read(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "Config file does not exist, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path).await {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    debug!(path = %path.display(), "Config loaded successfully");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                Self::default()
            }
        }
    }

    /// Write config as pretty JSON, creating parent directories.
    pub async fn write(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).await?;
            }
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(path, content).await?;
        debug!(path = %path.display(), "Config saved successfully");

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Build the HTTP client shared by every call made with this config.
    pub fn build_http_client(&self) -> Result<reqwest::Client> {
        if self.base_url.trim().is_empty() {
            return Err(ClientError::Config("base_url is empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ClientError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }

        reqwest::Client::builder()
            .timeout(self.request_timeout())
            .connect_timeout(self.connect_timeout())
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))
    }
}

fn parse_secs(key: &str, value: Option<String>) -> Option<u64> {
    let raw = value?;
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(secs),
        _ => {
            warn!(key, value = %raw, "Ignoring invalid timeout override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_API_URL, "http://detector.internal:9000"),
            (ENV_REQUEST_TIMEOUT, "30"),
            (ENV_CONNECT_TIMEOUT, "not-a-number"),
        ]);
        let config =
            ClientConfig::default().with_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.base_url, "http://detector.internal:9000");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.connect_timeout_secs, 5);
    }

    #[test]
    fn test_build_http_client_rejects_empty_base_url() {
        let config = ClientConfig::new("  ");
        assert!(matches!(
            config.build_http_client(),
            Err(ClientError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_config_read_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let config = ClientConfig::read(&temp_dir.path().join("missing.json")).await;
        assert_eq!(config, ClientConfig::default());
    }

    #[tokio::test]
    async fn test_config_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".phishscope").join("config.json");

        let config = ClientConfig {
            base_url: "http://10.0.0.7:8000".to_string(),
            request_timeout_secs: 3,
            connect_timeout_secs: 1,
        };
        config.write(&path).await.unwrap();

        let loaded = ClientConfig::read(&path).await;
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_config_read_partial_and_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let partial = temp_dir.path().join("partial.json");
        tokio::fs::write(&partial, r#"{"base_url":"http://h:1"}"#)
            .await
            .unwrap();
        let loaded = ClientConfig::read(&partial).await;
        assert_eq!(loaded.base_url, "http://h:1");
        assert_eq!(loaded.request_timeout_secs, 10);

        let broken = temp_dir.path().join("broken.json");
        tokio::fs::write(&broken, "{not json").await.unwrap();
        assert_eq!(ClientConfig::read(&broken).await, ClientConfig::default());
    }
}
