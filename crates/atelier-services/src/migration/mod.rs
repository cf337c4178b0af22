//! Asset migration workflow.
//!
//! Three operator-run phases that communicate only through the asset map file:
//! 1. `Uploader` pushes local media to remote storage and records each URL.
//! 2. `Rewriter` replaces quoted local paths in the source tree with those URLs.
//! 3. `Cleaner` deletes local files that the map lists as migrated.

mod asset_map;
mod cleaner;
mod error;
mod rewriter;
mod uploader;

pub use asset_map::AssetMapStore;
pub use cleaner::{Cleaner, CleanupReport};
pub use error::MigrationError;
pub use rewriter::{rewrite_source, RewriteReport, Rewriter, REWRITE_EXTENSIONS, SKIPPED_DIRS};
pub use uploader::{UploadFailure, UploadOutcome, UploadReport, UploadSource, Uploader};
