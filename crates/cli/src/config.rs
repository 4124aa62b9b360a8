use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// Service configuration, loadable from a TOML file with every field
/// optional. CLI flags and environment variables override file values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Address the API server binds to.
    pub bind: String,
    /// SQLite database URL.
    pub database_url: String,
    /// Base URL of the upstream exchange REST API.
    pub exchange_url: String,
    /// Trading pairs shown on the dashboard, in display order.
    pub products: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
            database_url: "sqlite://coinview.db".to_string(),
            exchange_url: coinview_exchange::DEFAULT_BASE_URL.to_string(),
            products: ["BTC-USD", "ETH-USD", "SOL-USD", "MATIC-USD"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                Self::from_toml(&raw)
                    .with_context(|| format!("parsing config file {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}
