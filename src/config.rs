//! Configuration file support for cinecharts
//!
//! Reads from .cinecharts/config.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration structure
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    /// Voting server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Chart defaults
    #[serde(default)]
    pub charts: ChartConfig,
}

/// Where the voting server lives and how long to wait for it
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Base URL of the voting server's API
    /// Default: "http://localhost:8000"
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    /// Default: 10
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Chart-related configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChartConfig {
    /// Period used when none is given on the command line
    /// Default: "all"
    #[serde(default = "default_period")]
    pub default_period: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_period() -> String {
    "all".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            default_period: default_period(),
        }
    }
}

impl Config {
    /// Load config from .cinecharts/config.toml
    /// Returns default config if file doesn't exist
    pub fn load() -> Self {
        if let Some(path) = Self::find_config_path() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                if let Ok(config) = toml::from_str(&contents) {
                    return config;
                }
            }
        }
        Self::default()
    }

    /// Find config.toml by walking up directory tree
    fn find_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut dir = current_dir.as_path();

        loop {
            let config_path = dir.join(".cinecharts").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            match dir.parent() {
                Some(parent) => dir = parent,
                None => break,
            }
        }
        None
    }

    /// Effective server URL: CLI flag > CINECHARTS_SERVER env > config file
    pub fn resolve_server(&self, flag: Option<&str>) -> String {
        if let Some(url) = flag {
            return url.to_string();
        }
        if let Ok(url) = std::env::var("CINECHARTS_SERVER") {
            if !url.trim().is_empty() {
                return url;
            }
        }
        self.server.base_url.clone()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.server.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(config.server.timeout_secs, 10);
        assert_eq!(config.charts.default_period, "all");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[server]
base_url = "https://films.example.org"
timeout_secs = 3

[charts]
default_period = "month"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.base_url, "https://films.example.org");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.charts.default_period, "month");
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: Config = toml::from_str("[server]\nbase_url = \"http://films:9999\"\n").unwrap();
        assert_eq!(config.server.base_url, "http://films:9999");
        assert_eq!(config.server.timeout_secs, 10);
        assert_eq!(config.charts.default_period, "all");
    }

    #[test]
    fn test_resolve_server_flag_wins() {
        let config = Config::default();
        assert_eq!(
            config.resolve_server(Some("http://flag:1234")),
            "http://flag:1234"
        );
    }
}
