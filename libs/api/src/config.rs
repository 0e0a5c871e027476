use serde::Deserialize;
use toml::{map::Map, Value};

/// Settings read from `Config.toml`. Every section and key is optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub log: LogConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub token_exp_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_exp_secs: 86400,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    /// Log lines are appended here instead of stdout when set.
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    pub fn load(config_name: &str) -> anyhow::Result<Self> {
        let config = util::load_config(config_name)?;
        Self::try_from(config)
    }
}

impl TryFrom<Map<String, Value>> for Config {
    type Error = anyhow::Error;

    fn try_from(value: Map<String, Value>) -> Result<Self, Self::Error> {
        Ok(Value::Table(value).try_into()?)
    }
}
