//! Atelier Services Library
//!
//! Business logic shared by the API server and the migration CLI:
//! - `email_validation`: address plausibility checks for the contact form
//! - `migration`: upload, rewrite and cleanup phases of the asset migration

pub mod email_validation;
pub mod migration;

// Re-export commonly used types
#[cfg(feature = "dns")]
pub use email_validation::DnsMxResolver;
pub use email_validation::{EmailValidator, MxLookup, MxResolver};
pub use migration::{
    rewrite_source, AssetMapStore, Cleaner, CleanupReport, MigrationError, RewriteReport,
    Rewriter, UploadFailure, UploadOutcome, UploadReport, UploadSource, Uploader,
};
