use std::fs;
use std::path::{Path, PathBuf};

use atelier_core::models::{AssetKind, AssetMap};

use super::uploader::list_files;
use super::MigrationError;

/// Summary of a cleanup pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Files removed, or that would be removed on a dry run
    pub deleted: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
    pub dry_run: bool,
}

impl CleanupReport {
    pub fn deleted_count(&self) -> usize {
        self.deleted.len()
    }
}

/// Deletes local media files that the asset map lists as migrated
pub struct Cleaner {
    roots: Vec<(AssetKind, PathBuf)>,
    dry_run: bool,
}

impl Cleaner {
    pub fn new(images_dir: impl Into<PathBuf>, videos_dir: impl Into<PathBuf>) -> Self {
        Self {
            roots: vec![
                (AssetKind::Image, images_dir.into()),
                (AssetKind::Video, videos_dir.into()),
            ],
            dry_run: false,
        }
    }

    /// List what would be deleted without deleting anything
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn run(&self, map: &AssetMap) -> Result<CleanupReport, MigrationError> {
        let mut report = CleanupReport {
            dry_run: self.dry_run,
            ..CleanupReport::default()
        };

        for (kind, root) in &self.roots {
            self.clean_root(*kind, root, map, &mut report)?;
        }

        Ok(report)
    }

    fn clean_root(
        &self,
        kind: AssetKind,
        root: &Path,
        map: &AssetMap,
        report: &mut CleanupReport,
    ) -> Result<(), MigrationError> {
        let files = match list_files(root) {
            Ok(files) => files,
            Err(MigrationError::MissingDirectory(_)) => {
                tracing::info!(root = %root.display(), kind = %kind, "Media directory missing, nothing to clean");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        for path in files {
            let migrated = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| map.contains(kind, name));
            if !migrated {
                continue;
            }

            if self.dry_run {
                tracing::info!(file = %path.display(), "Would delete");
                report.deleted.push(path);
                continue;
            }

            match fs::remove_file(&path) {
                Ok(()) => {
                    tracing::info!(file = %path.display(), "Deleted");
                    report.deleted.push(path);
                }
                Err(e) => {
                    tracing::error!(file = %path.display(), error = %e, "Could not delete file");
                    report.failed.push((path, e.to_string()));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct Fixture {
        _dir: tempfile::TempDir,
        images: PathBuf,
        videos: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = tempdir().unwrap();
        let images = dir.path().join("images");
        let videos = dir.path().join("video");
        fs::create_dir_all(&images).unwrap();
        fs::create_dir_all(&videos).unwrap();
        for name in ["logo.png", "keep.png"] {
            fs::write(images.join(name), b"img").unwrap();
        }
        fs::write(videos.join("reel.mp4"), b"vid").unwrap();
        // Same name as a migrated image, but in the video directory
        fs::write(videos.join("logo.png"), b"img").unwrap();
        Fixture {
            _dir: dir,
            images,
            videos,
        }
    }

    fn map() -> AssetMap {
        let mut map = AssetMap::new();
        map.insert(AssetKind::Image, "logo.png", "https://cdn/logo.png");
        map.insert(AssetKind::Video, "reel.mp4", "https://cdn/reel.mp4");
        map
    }

    #[test]
    fn deletes_only_mapped_files() {
        let fx = fixture();

        let report = Cleaner::new(&fx.images, &fx.videos).run(&map()).unwrap();

        assert_eq!(report.deleted_count(), 2);
        assert!(!fx.images.join("logo.png").exists());
        assert!(!fx.videos.join("reel.mp4").exists());
        assert!(fx.images.join("keep.png").exists());
        assert!(fx.videos.join("logo.png").exists());
    }

    #[test]
    fn dry_run_deletes_nothing() {
        let fx = fixture();

        let report = Cleaner::new(&fx.images, &fx.videos)
            .dry_run(true)
            .run(&map())
            .unwrap();

        assert!(report.dry_run);
        assert_eq!(report.deleted_count(), 2);
        assert!(fx.images.join("logo.png").exists());
        assert!(fx.videos.join("reel.mp4").exists());
    }

    #[test]
    fn missing_directory_counts_zero() {
        let dir = tempdir().unwrap();
        let report = Cleaner::new(dir.path().join("images"), dir.path().join("video"))
            .run(&map())
            .unwrap();
        assert_eq!(report.deleted_count(), 0);
    }

    #[test]
    fn empty_map_deletes_nothing() {
        let fx = fixture();
        let report = Cleaner::new(&fx.images, &fx.videos)
            .run(&AssetMap::new())
            .unwrap();
        assert_eq!(report.deleted_count(), 0);
        assert!(fx.images.join("logo.png").exists());
    }
}
