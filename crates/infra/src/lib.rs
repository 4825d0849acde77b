//! Infrastructure layer: storage backends, use-case orchestration, config.

pub mod config;
pub mod repository;
pub mod service;

pub use config::{ConfigError, RepositoryKind, WarehouseConfig};
pub use repository::{InMemoryRepository, JsonRepository, Repository, RepositoryError};
pub use service::{WarehouseService, ALL_CATEGORIES};
