//! Configuration loading and representation.
//!
//! Configuration comes from environment variables:
//!
//! - `WAREHOUSE_REPOSITORY`: `memory` (default) or `json`
//! - `WAREHOUSE_DATA_PATH`: seed file for the `json` backend (default `data/testdata.json`)

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::repository::{InMemoryRepository, JsonRepository, Repository, RepositoryError};

pub const REPOSITORY_VAR: &str = "WAREHOUSE_REPOSITORY";
pub const DATA_PATH_VAR: &str = "WAREHOUSE_DATA_PATH";
pub const DEFAULT_DATA_PATH: &str = "data/testdata.json";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown repository type {0:?} (expected \"memory\" or \"json\")")]
    UnknownRepository(String),
}

/// Storage backend selection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RepositoryKind {
    #[default]
    Memory,
    Json,
}

impl FromStr for RepositoryKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(RepositoryKind::Memory),
            "json" => Ok(RepositoryKind::Json),
            _ => Err(ConfigError::UnknownRepository(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseConfig {
    pub repository: RepositoryKind,
    pub data_path: PathBuf,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            repository: RepositoryKind::default(),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl WarehouseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key/value source (unset or blank keys fall back to defaults).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let repository = match value(REPOSITORY_VAR) {
            Some(raw) => raw.parse()?,
            None => defaults.repository,
        };
        let data_path = value(DATA_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        Ok(Self {
            repository,
            data_path,
        })
    }

    /// Repository factory for the configured backend.
    pub fn build_repository(&self) -> Result<Box<dyn Repository>, RepositoryError> {
        let repository: Box<dyn Repository> = match self.repository {
            RepositoryKind::Memory => Box::new(InMemoryRepository::new()),
            RepositoryKind::Json => Box::new(JsonRepository::open(&self.data_path)?),
        };
        tracing::info!(backend = ?self.repository, "repository ready");
        Ok(repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_memory() {
        let config = WarehouseConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, WarehouseConfig::default());
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
    }

    #[test]
    fn reads_json_backend_and_path() {
        let config = WarehouseConfig::from_lookup(lookup(&[
            (REPOSITORY_VAR, "JSON"),
            (DATA_PATH_VAR, "/tmp/seed.json"),
        ]))
        .unwrap();
        assert_eq!(config.repository, RepositoryKind::Json);
        assert_eq!(config.data_path, PathBuf::from("/tmp/seed.json"));
    }

    #[test]
    fn unknown_backend_is_an_error() {
        let err = WarehouseConfig::from_lookup(lookup(&[(REPOSITORY_VAR, "sqlite")])).unwrap_err();
        assert_eq!(err, ConfigError::UnknownRepository("sqlite".to_string()));
    }

    #[test]
    fn builds_seeded_json_repository() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"products": [{"product_id": "P1", "name": "Oil", "price": 10.0}]}"#)
            .unwrap();

        let config = WarehouseConfig {
            repository: RepositoryKind::Json,
            data_path: file.path().to_path_buf(),
        };
        let repo = config.build_repository().unwrap();
        assert_eq!(repo.load_all_products().len(), 1);
    }

    #[test]
    fn builds_empty_memory_repository() {
        let repo = WarehouseConfig::default().build_repository().unwrap();
        assert!(repo.load_all_products().is_empty());
        assert!(repo.load_movements().is_empty());
    }
}
