//! Atelier Core Library
//!
//! Domain models, error types and configuration shared by the API server,
//! the migration CLI and the service crates.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

pub use config::{Config, MigrationConfig, ServerConfig, StorageConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
