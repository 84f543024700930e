// src/core/config_manager.rs
//! Configuration loading: defaults, optional config.yaml, then environment overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://recruit-io-backend.vercel.app/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DATABASE_FILE: &str = "recruit_ranker.db";
const DEFAULT_LOG_PATH: &str = "/tmp/recruit_ranker.log";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub service: ServiceConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub api_base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub database_path: PathBuf,
    pub log_path: PathBuf,
}

/// One environment section of config.yaml; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigSection {
    pub api_base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub database_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: ConfigSection,
    #[serde(default)]
    production: ConfigSection,
}

impl ConfigManager {
    /// Load configuration from ./config.yaml (if present) and the process environment
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();

        let config_path = PathBuf::from(CONFIG_FILE);
        let section = if config_path.exists() {
            Self::load_section(&config_path, &environment)?
        } else {
            ConfigSection::default()
        };

        let base_dir = std::env::current_dir().context("Failed to get current directory")?;
        Self::from_parts(environment, section, &base_dir, |key| std::env::var(key).ok())
    }

    fn get_environment() -> String {
        std::env::var("RECRUIT_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_section(path: &Path, environment: &str) -> Result<ConfigSection> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(match environment {
            "production" => file.production,
            _ => file.local,
        })
    }

    /// Merge a config section with environment overrides.
    /// Relative paths are resolved against `base_dir`.
    pub fn from_parts<F>(
        environment: String,
        section: ConfigSection,
        base_dir: &Path,
        env: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = env("RECRUIT_API_URL")
            .or(section.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_seconds = match env("RECRUIT_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("RECRUIT_TIMEOUT_SECS must be a number, got {}", raw))?,
            None => section.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        let database_path = env("RECRUIT_DB_PATH")
            .map(PathBuf::from)
            .or(section.database_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILE));

        let log_path = env("RECRUIT_LOG_PATH")
            .map(PathBuf::from)
            .or(section.log_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH));

        Ok(Self {
            environment,
            service: ServiceConfig {
                api_base_url,
                timeout_seconds,
            },
            storage: StorageConfig {
                database_path: resolve_path(base_dir, database_path),
                log_path: resolve_path(base_dir, log_path),
            },
        })
    }

    /// Ensure the parent directories of the database and log files exist
    pub async fn ensure_directories(&self) -> Result<()> {
        for file in [&self.storage.database_path, &self.storage.log_path] {
            if let Some(parent) = file.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }
        Ok(())
    }
}

fn resolve_path(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}
