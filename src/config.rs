//! Application configuration.
//!
//! Values come from, highest precedence first: environment variables,
//! a TOML file (`CONFIG_PATH`, default `config.toml`, optional), defaults.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Prefix for the review routes, e.g. `/api`
    pub base_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            base_path: "/api".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongodb,
    Memory,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Mongodb => write!(f, "mongodb"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::Mongodb),
            "memory" => Ok(StoreBackend::Memory),
            other => bail!("Unknown store backend: {}", other),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub url: String,
    pub name: String,
    pub collection: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Mongodb,
            url: "mongodb://localhost:27017".to_string(),
            name: "movie_reviews".to_string(),
            collection: "user-reviews".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment and config file
    pub fn load() -> Result<Self> {
        let env: HashMap<String, String> = std::env::vars().collect();
        let path = env
            .get("CONFIG_PATH")
            .cloned()
            .unwrap_or_else(|| "config.toml".to_string());

        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_env(&env)?;
        config.normalize();
        Ok(config)
    }

    /// Parse a TOML config file; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_toml(&raw).with_context(|| format!("Invalid config file {:?}", path))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn apply_env(&mut self, env: &HashMap<String, String>) -> Result<()> {
        if let Some(host) = env.get("HOST") {
            self.server.host = host.clone();
        }
        if let Some(port) = env.get("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid PORT: {}", port))?;
        }
        if let Some(base_path) = env.get("BASE_PATH") {
            self.server.base_path = base_path.clone();
        }
        if let Some(url) = env.get("MONGODB_URL").or_else(|| env.get("mongodburl")) {
            self.database.url = url.clone();
        }
        if let Some(name) = env.get("MONGODB_DATABASE") {
            self.database.name = name.clone();
        }
        if let Some(collection) = env.get("MONGODB_COLLECTION") {
            self.database.collection = collection.clone();
        }
        if let Some(backend) = env.get("STORE_BACKEND") {
            self.database.backend = backend.parse()?;
        }
        Ok(())
    }

    /// `api/`, `/api/` and `/api` all mean `/api`; `/` means the root.
    fn normalize(&mut self) {
        let trimmed = self.server.base_path.trim().trim_matches('/');
        self.server.base_path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        };
    }
}
