use std::path::PathBuf;

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    File,
    /// Nothing survives a restart.
    Memory,
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values are rejected.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage_kind: StorageKind,
    pub storage_dir: PathBuf,
    pub storage_key: String,
    pub cloud_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            storage_kind: parse_storage_kind(&env_or("STORAGE_BACKEND", "file"))?,
            storage_dir: PathBuf::from(env_or("STORAGE_DIR", "./data")),
            storage_key: env_or("STORAGE_KEY", "resumeState"),
            cloud_url: std::env::var("CLOUD_URL").ok().filter(|v| !v.trim().is_empty()),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_storage_kind(value: &str) -> Result<StorageKind> {
    match value.trim().to_ascii_lowercase().as_str() {
        "file" => Ok(StorageKind::File),
        "memory" => Ok(StorageKind::Memory),
        other => bail!("STORAGE_BACKEND must be 'file' or 'memory', got '{other}'"),
    }
}
