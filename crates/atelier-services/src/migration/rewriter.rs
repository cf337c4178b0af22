use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use atelier_core::models::AssetMap;

use super::MigrationError;

/// Extensions of files that may reference media paths
pub const REWRITE_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "mjs", "cjs", "html", "css", "scss", "json", "md", "mdx", "vue",
    "svelte",
];

/// Directories never descended into
pub const SKIPPED_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    ".git",
    ".next",
    "target",
    "coverage",
];

const QUOTES: [char; 3] = ['"', '\'', '`'];

/// Summary of a rewrite pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub files_scanned: usize,
    pub files_changed: usize,
    pub replacements: usize,
    pub changed: Vec<PathBuf>,
}

/// Replace quoted local media paths in `source` with their remote URLs.
///
/// `"/images/logo.png"` becomes `"https://cdn/.../logo.png"`, keeping whichever quote
/// character wrapped the original. Unquoted occurrences are left as they are.
/// Returns `None` when nothing matched.
pub fn rewrite_source(source: &str, map: &AssetMap) -> Option<String> {
    match substitute(source, map) {
        (Cow::Owned(rewritten), n) if n > 0 => Some(rewritten),
        _ => None,
    }
}

fn substitute<'a>(source: &'a str, map: &AssetMap) -> (Cow<'a, str>, usize) {
    let mut content = Cow::Borrowed(source);
    let mut replacements = 0;

    for record in map.records() {
        let local = record.kind.local_path(&record.original_filename);
        for quote in QUOTES {
            let needle = format!("{quote}{local}{quote}");
            let hits = content.matches(needle.as_str()).count();
            if hits == 0 {
                continue;
            }
            let replacement = format!("{quote}{}{quote}", record.remote_url);
            content = Cow::Owned(content.replace(needle.as_str(), &replacement));
            replacements += hits;
        }
    }

    (content, replacements)
}

/// Walks a project tree and rewrites media references in place
pub struct Rewriter {
    project_root: PathBuf,
    skip_dirs: Vec<String>,
}

impl Rewriter {
    /// `scripts_dir` is skipped in addition to `SKIPPED_DIRS` so the migration
    /// never rewrites its own asset map.
    pub fn new(project_root: impl Into<PathBuf>, scripts_dir: &str) -> Self {
        let mut skip_dirs: Vec<String> = SKIPPED_DIRS.iter().map(|d| d.to_string()).collect();
        if !scripts_dir.is_empty() {
            skip_dirs.push(scripts_dir.to_string());
        }
        Self {
            project_root: project_root.into(),
            skip_dirs,
        }
    }

    /// Rewrite every candidate file under the project root.
    ///
    /// Files without a match are not written, so their modification time is kept.
    pub fn run(&self, map: &AssetMap) -> Result<RewriteReport, MigrationError> {
        if !self.project_root.is_dir() {
            return Err(MigrationError::MissingDirectory(self.project_root.clone()));
        }

        let mut candidates = Vec::new();
        self.collect(&self.project_root, &mut candidates)?;

        let mut report = RewriteReport {
            files_scanned: candidates.len(),
            ..RewriteReport::default()
        };

        for path in candidates {
            let source = match fs::read_to_string(&path) {
                Ok(source) => source,
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "Skipping unreadable file");
                    continue;
                }
            };

            let (rewritten, hits) = substitute(&source, map);
            if hits == 0 {
                continue;
            }

            fs::write(&path, rewritten.as_bytes()).map_err(|e| MigrationError::io(&path, e))?;
            tracing::info!(file = %path.display(), replacements = hits, "Rewrote media references");

            report.files_changed += 1;
            report.replacements += hits;
            report.changed.push(path);
        }

        Ok(report)
    }

    fn collect(&self, dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), MigrationError> {
        let entries = fs::read_dir(dir).map_err(|e| MigrationError::io(dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| MigrationError::io(dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| MigrationError::io(&path, e))?;

            if file_type.is_dir() {
                let name = entry.file_name();
                let skipped = name
                    .to_str()
                    .is_some_and(|n| self.skip_dirs.iter().any(|d| d == n));
                if !skipped {
                    self.collect(&path, out)?;
                }
            } else if file_type.is_file() && has_rewrite_extension(&path) {
                out.push(path);
            }
        }

        Ok(())
    }
}

fn has_rewrite_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| REWRITE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}
