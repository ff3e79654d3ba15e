use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub recommend: RecommendConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
    /// Pool size for the account store. Account traffic is a handful of
    /// signin/signup requests, so the default stays small.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    4
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Full product catalog CSV (with a Tags column).
    pub products_path: PathBuf,
    /// Trending products CSV.
    pub trending_path: PathBuf,
    /// How many trending rows the listing shows.
    #[serde(default = "default_trending_rows")]
    pub trending_rows: usize,
}

fn default_trending_rows() -> usize {
    8
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecommendConfig {
    /// Result count used when a caller doesn't ask for one.
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            default_top_n: default_top_n(),
        }
    }
}

fn default_top_n() -> usize {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.db.max_connections == 0 {
        anyhow::bail!("db.max_connections must be > 0");
    }

    if config.catalog.trending_rows == 0 {
        anyhow::bail!("catalog.trending_rows must be > 0");
    }

    if config.recommend.default_top_n == 0 {
        anyhow::bail!("recommend.default_top_n must be > 0");
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(config)
}
