// src/core/config_manager.rs
//! Configuration: defaults, then `enhancer.yaml`, then environment variables

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::service_client::DEFAULT_SERVICE_URL;

pub const CONFIG_FILE_NAME: &str = "enhancer.yaml";
const DEFAULT_LOG_FILE: &str = "/tmp/resume-enhancer.log";

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigManager {
    pub service_url: String,
    pub output_dir: PathBuf,
    pub log_file: PathBuf,
}

/// Every key is optional; missing keys keep their default
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    service_url: Option<String>,
    output_dir: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            output_dir: PathBuf::from("."),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl ConfigManager {
    /// Load configuration from the working directory and the process environment
    pub fn load() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Self::load_from(&current_dir.join(CONFIG_FILE_NAME), |key| {
            std::env::var(key).ok()
        })
    }

    /// Load with an explicit config path and environment lookup
    pub fn load_from(
        config_path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let file: ConfigFile = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;
            info!("Loaded configuration file: {}", config_path.display());
            config.apply_file(file);
        }

        if let Some(url) = env("ENHANCER_SERVICE_URL").filter(|v| !v.is_empty()) {
            config.service_url = url;
        }
        if let Some(dir) = env("ENHANCER_OUTPUT_DIR").filter(|v| !v.is_empty()) {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(file) = env("ENHANCER_LOG_FILE").filter(|v| !v.is_empty()) {
            config.log_file = PathBuf::from(file);
        }

        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(url) = file.service_url {
            self.service_url = url;
        }
        if let Some(dir) = file.output_dir {
            self.output_dir = dir;
        }
        if let Some(log) = file.log_file {
            self.log_file = log;
        }
    }

    pub fn with_service_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.service_url = url;
        }
        self
    }

    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.output_dir = dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigManager::load_from(&dir.path().join(CONFIG_FILE_NAME), no_env).unwrap();
        assert_eq!(config, ConfigManager::default());
        assert_eq!(config.service_url, "http://127.0.0.1:5000/enhance-resume");
    }

    #[test]
    fn test_file_then_env_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "service_url: http://file:5000/enhance-resume\noutput_dir: exports\n",
        )
        .unwrap();

        let env: HashMap<&str, &str> =
            HashMap::from([("ENHANCER_SERVICE_URL", "http://env:9000/enhance-resume")]);
        let config =
            ConfigManager::load_from(&path, |key| env.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.service_url, "http://env:9000/enhance-resume");
        assert_eq!(config.output_dir, PathBuf::from("exports"));
        assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_cli_overrides_win() {
        let config = ConfigManager::default()
            .with_service_url(Some("http://cli/enhance-resume".into()))
            .with_output_dir(None);
        assert_eq!(config.service_url, "http://cli/enhance-resume");
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "service_url: [unclosed").unwrap();
        assert!(ConfigManager::load_from(&path, no_env).is_err());
    }
}
