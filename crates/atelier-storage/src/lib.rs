//! Atelier Storage Library
//!
//! Remote object storage used by the asset migration workflow. The `Storage` trait
//! has an S3-compatible implementation (object_store) and a local filesystem one.
//!
//! # Storage key format
//!
//! Migrated assets are stored under `{folder}/{filename}`, e.g.
//! `website/images/logo.png`. Keys must not contain a `..` segment or a leading `/`.
//! Public URLs percent-encode each key segment.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use atelier_core::StorageBackend;
pub use factory::create_storage;
pub use keys::asset_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult, UploadReader};
