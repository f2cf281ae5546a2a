use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StorageConfig {
    Postgres { dsn: String },
    Memory,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

impl Config {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_config(contents: &str) -> Result<Config, Box<dyn std::error::Error>> {
    serde_yaml::from_str(contents).map_err(Into::into)
}

fn load_from_env() -> Result<Config, Box<dyn std::error::Error>> {
    let host = env::var("HOST").unwrap_or_else(|_| default_host());

    let port = match env::var("PORT") {
        Ok(port) => port
            .parse::<u16>()
            .map_err(|e| format!("Failed to parse PORT: {e}"))?,
        Err(_) => default_port(),
    };

    let storage = match env::var("PG_DSN") {
        Ok(dsn) => StorageConfig::Postgres { dsn },
        Err(_) => {
            tracing::warn!("PG_DSN is not set, notes will be kept in memory only");
            StorageConfig::Memory
        }
    };

    Ok(Config {
        host,
        port,
        storage,
    })
}

const FALLBACK_FILES: [&str; 2] = ["config.yaml", "config.example.yaml"];

/// Config files to try, in order, without duplicates.
fn candidate_files(config_path: &str) -> Vec<&str> {
    let mut candidates = vec![config_path];
    candidates.extend(FALLBACK_FILES.iter().copied().filter(|file| *file != config_path));
    candidates
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let config_path = env::var("NOTE_TAKER_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
    let candidates = candidate_files(&config_path);

    if let Some(found) = candidates.iter().find(|file| Path::new(file).exists()) {
        if *found != config_path {
            tracing::warn!("Config file '{}' not found, using '{}'", config_path, found);
        }
        if *found == "config.example.yaml" {
            tracing::warn!("'config.example.yaml' holds placeholder values and should be replaced");
        }
        return parse_config(&fs::read_to_string(found)?);
    }

    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    load_from_env().map_err(|e| {
        format!(
            "No config file found (tried {candidates:?}) and environment variables are invalid: {e}"
        )
        .into()
    })
}
