use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::diagram::Style;
use crate::error::ConfigError;
use crate::gateway::DEFAULT_ENDPOINT;

/// Application configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Style applied to a fresh store before any document is loaded.
    #[serde(default)]
    pub style: Style,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_url")]
    pub url: String,

    /// No timeout when absent.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Executable used for local rendering.
    #[serde(default = "default_plantuml")]
    pub plantuml: String,
}

fn default_url() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_plantuml() -> String {
    "plantuml".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: None,
            plantuml: default_plantuml(),
        }
    }
}

impl GatewayConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
