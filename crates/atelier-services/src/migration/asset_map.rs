use std::fs;
use std::path::{Path, PathBuf};

use atelier_core::models::AssetMap;

use super::MigrationError;

/// Reads and writes the asset map document.
///
/// The file is always replaced as a whole: an upload run writes a fresh map, the
/// other phases only read it.
#[derive(Debug, Clone)]
pub struct AssetMapStore {
    path: PathBuf,
}

impl AssetMapStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<AssetMap, MigrationError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| MigrationError::io(&self.path, e))?;
        serde_json::from_str(&raw).map_err(|source| MigrationError::AssetMap {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the map file, going through a sibling temp file so readers never
    /// see a half-written document.
    pub fn save(&self, map: &AssetMap) -> Result<(), MigrationError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| MigrationError::io(parent, e))?;
        }

        let mut json = serde_json::to_string_pretty(map).map_err(|source| {
            MigrationError::AssetMap {
                path: self.path.clone(),
                source,
            }
        })?;
        json.push('\n');

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| MigrationError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| MigrationError::io(&self.path, e))?;

        tracing::info!(
            path = %self.path.display(),
            images = map.images.len(),
            videos = map.videos.len(),
            "Asset map written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::models::AssetKind;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_preserves_entries() {
        let dir = tempdir().unwrap();
        let store = AssetMapStore::new(dir.path().join("scripts/asset-map.json"));

        let mut map = AssetMap::new();
        map.insert(AssetKind::Image, "logo.png", "https://cdn/x/logo.png");
        map.insert(AssetKind::Video, "reel.mp4", "https://cdn/x/reel.mp4");
        store.save(&map).unwrap();

        assert_eq!(store.load().unwrap(), map);
    }

    #[test]
    fn saved_document_is_sorted_and_has_both_sections() {
        let dir = tempdir().unwrap();
        let store = AssetMapStore::new(dir.path().join("asset-map.json"));

        let mut map = AssetMap::new();
        map.insert(AssetKind::Image, "zebra.png", "https://cdn/zebra.png");
        map.insert(AssetKind::Image, "apple.png", "https://cdn/apple.png");
        store.save(&map).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.find("apple.png").unwrap() < raw.find("zebra.png").unwrap());

        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["images".to_string(), "videos".to_string()]);
    }

    #[test]
    fn save_overwrites_previous_map() {
        let dir = tempdir().unwrap();
        let store = AssetMapStore::new(dir.path().join("asset-map.json"));

        let mut first = AssetMap::new();
        first.insert(AssetKind::Image, "old.png", "https://cdn/old.png");
        store.save(&first).unwrap();

        let mut second = AssetMap::new();
        second.insert(AssetKind::Image, "new.png", "https://cdn/new.png");
        store.save(&second).unwrap();

        let loaded = store.load().unwrap();
        assert!(!loaded.contains(AssetKind::Image, "old.png"));
        assert!(loaded.contains(AssetKind::Image, "new.png"));
    }

    #[test]
    fn malformed_map_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("asset-map.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = AssetMapStore::new(&path).load();
        assert!(matches!(result, Err(MigrationError::AssetMap { .. })));
    }
}
