use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use atelier_core::models::{AssetKind, AssetMap};
use atelier_storage::{asset_key, Storage, UploadReader};
use futures::stream::{self, StreamExt};

use super::MigrationError;

/// Outcome of uploading one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded { url: String },
    Failed { reason: String },
}

/// A file that could not be uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub kind: AssetKind,
    pub filename: String,
    pub reason: String,
}

/// Per-file results of an upload run
#[derive(Debug, Clone, Default)]
pub struct UploadReport {
    pub map: AssetMap,
    pub failures: Vec<UploadFailure>,
}

impl UploadReport {
    pub fn uploaded(&self, kind: AssetKind) -> &BTreeMap<String, String> {
        self.map.section(kind)
    }

    fn record(&mut self, kind: AssetKind, filename: String, outcome: UploadOutcome) {
        match outcome {
            UploadOutcome::Uploaded { url } => self.map.insert(kind, filename, url),
            UploadOutcome::Failed { reason } => self.failures.push(UploadFailure {
                kind,
                filename,
                reason,
            }),
        }
    }
}

/// One local media directory and the remote folder it is published to
#[derive(Debug, Clone)]
pub struct UploadSource {
    pub kind: AssetKind,
    pub root: PathBuf,
    pub remote_folder: String,
}

/// Pushes local media files to remote storage
pub struct Uploader {
    storage: Arc<dyn Storage>,
    concurrency: usize,
}

impl Uploader {
    pub fn new(storage: Arc<dyn Storage>, concurrency: usize) -> Self {
        Self {
            storage,
            concurrency: concurrency.max(1),
        }
    }

    /// Upload every source and aggregate the results.
    ///
    /// All roots are checked before anything is uploaded, so a missing directory
    /// aborts the run without touching remote storage.
    pub async fn upload_all(&self, sources: &[UploadSource]) -> Result<UploadReport, MigrationError> {
        for source in sources {
            if !source.root.is_dir() {
                return Err(MigrationError::MissingDirectory(source.root.clone()));
            }
        }

        let mut report = UploadReport::default();
        for source in sources {
            let results = self
                .upload_dir(&source.root, &source.remote_folder, source.kind)
                .await?;
            for (filename, outcome) in results {
                report.record(source.kind, filename, outcome);
            }
        }

        Ok(report)
    }

    /// Upload every regular file directly inside `root` (non-recursive).
    ///
    /// Returns one outcome per file; a failing file never stops the others.
    #[tracing::instrument(skip(self, root), fields(root = %root.display()))]
    pub async fn upload_dir(
        &self,
        root: &Path,
        remote_folder: &str,
        kind: AssetKind,
    ) -> Result<Vec<(String, UploadOutcome)>, MigrationError> {
        let files = list_files(root)?;
        tracing::info!(count = files.len(), kind = %kind, "Uploading media files");

        let results = stream::iter(files)
            .map(|path| async move {
                let filename = file_name(&path);
                let outcome = match filename {
                    Some(ref name) => self.upload_file(&path, remote_folder, name, kind).await,
                    None => UploadOutcome::Failed {
                        reason: "file name is not valid UTF-8".to_string(),
                    },
                };
                let label = filename.unwrap_or_else(|| path.to_string_lossy().into_owned());
                (label, outcome)
            })
            .buffer_unordered(self.concurrency)
            .collect::<Vec<_>>()
            .await;

        Ok(results)
    }

    async fn upload_file(
        &self,
        path: &Path,
        remote_folder: &str,
        filename: &str,
        kind: AssetKind,
    ) -> UploadOutcome {
        let key = asset_key(remote_folder, filename);
        let content_type = kind.content_type_for(filename);

        let file = match tokio::fs::File::open(path).await {
            Ok(file) => file,
            Err(e) => {
                tracing::error!(file = %path.display(), error = %e, "Could not open media file");
                return UploadOutcome::Failed {
                    reason: format!("could not open file: {}", e),
                };
            }
        };
        let content_length = file.metadata().await.ok().map(|m| m.len());
        let reader: UploadReader = Box::pin(file);

        match self
            .storage
            .upload_stream(&key, content_type, content_length, reader)
            .await
        {
            Ok(url) => {
                tracing::info!(file = filename, url = %url, "Uploaded");
                UploadOutcome::Uploaded { url }
            }
            Err(e) => {
                tracing::error!(file = filename, key = %key, error = %e, "Upload failed");
                UploadOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(String::from)
}

/// Regular files directly inside `root`, sorted by path
pub(crate) fn list_files(root: &Path) -> Result<Vec<PathBuf>, MigrationError> {
    let entries = std::fs::read_dir(root).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => MigrationError::MissingDirectory(root.to_path_buf()),
        _ => MigrationError::io(root, e),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MigrationError::io(root, e))?;
        let file_type = entry.file_type().map_err(|e| MigrationError::io(entry.path(), e))?;
        if file_type.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}
