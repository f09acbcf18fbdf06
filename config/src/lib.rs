use anyhow::Error;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub ratings_table: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoaderConfig {
    pub separator: String,
    pub chunk_size: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    pub database: DatabaseConfig,
    pub loader: LoaderConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        let parsed: Self = toml::from_str(&contents)?;
        Ok(parsed)
    }
}
