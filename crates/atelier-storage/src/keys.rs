//! Shared key generation for storage backends.

use crate::{StorageError, StorageResult};

/// Build the storage key for an asset: `{folder}/{filename}`.
///
/// Leading and trailing slashes on `folder` are ignored; an empty folder puts the
/// file at the bucket root.
pub fn asset_key(folder: &str, filename: &str) -> String {
    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        filename.to_string()
    } else {
        format!("{}/{}", folder, filename)
    }
}

/// Reject keys that could escape the storage root.
///
/// Only a whole `..` segment is a traversal; dots inside a filename are fine.
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty()
        || storage_key.starts_with('/')
        || storage_key.split('/').any(|segment| segment == "..")
    {
        return Err(StorageError::InvalidKey(format!(
            "Storage key contains invalid characters: {:?}",
            storage_key
        )));
    }
    Ok(())
}

/// Percent-encode each segment of a key, keeping the `/` separators
pub fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Join a public base URL and an encoded key with exactly one slash between them
pub fn join_url(base_url: &str, key: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), encode_key(key))
}
