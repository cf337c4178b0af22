//! Helpers for the `atelier-migrate` binary: configuration layering and report output.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use atelier_core::models::AssetMap;
use atelier_core::MigrationConfig;
use atelier_services::{CleanupReport, RewriteReport, UploadReport};

/// Command-line values that take precedence over the environment, keyed by variable name.
#[derive(Debug, Default, Clone)]
pub struct Overrides(HashMap<&'static str, String>);

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &'static str, value: Option<impl ToString>) -> &mut Self {
        if let Some(value) = value {
            self.0.insert(key, value.to_string());
        }
        self
    }

    pub fn set_path(&mut self, key: &'static str, value: Option<&Path>) -> &mut Self {
        self.set(key, value.map(|p| p.display().to_string()))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// Build the migration config from overrides first, then `fallback`.
///
/// Overriding `MIGRATION_PROJECT_ROOT` moves every default derived from it.
pub fn config_from<F>(overrides: &Overrides, fallback: F) -> anyhow::Result<MigrationConfig>
where
    F: Fn(&str) -> Option<String>,
{
    MigrationConfig::from_lookup(|key| overrides.get(key).or_else(|| fallback(key)))
        .context("Invalid migration configuration")
}

/// Build the migration config from overrides, the environment and `.env`.
pub fn load_config(overrides: &Overrides) -> anyhow::Result<MigrationConfig> {
    dotenvy::dotenv().ok();
    config_from(overrides, |key| std::env::var(key).ok())
}

pub fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

pub fn upload_summary(report: &UploadReport, map_path: &Path) -> String {
    let mut lines = vec![format!(
        "Uploaded {} images and {} videos; map written to {}",
        report.map.images.len(),
        report.map.videos.len(),
        map_path.display()
    )];
    if !report.failures.is_empty() {
        lines.push(format!("{} files failed:", report.failures.len()));
        for failure in &report.failures {
            lines.push(format!(
                "  {} {}: {}",
                failure.kind, failure.filename, failure.reason
            ));
        }
    }
    lines.join("\n")
}

pub fn rewrite_summary(report: &RewriteReport, root: &Path) -> String {
    let mut lines = vec![format!(
        "Scanned {} files, rewrote {} ({} references replaced)",
        report.files_scanned, report.files_changed, report.replacements
    )];
    for path in &report.changed {
        lines.push(format!("  {}", relative(path, root).display()));
    }
    lines.join("\n")
}

pub fn cleanup_summary(report: &CleanupReport) -> String {
    let verb = if report.dry_run { "Would delete" } else { "Deleted" };
    let mut lines = vec![format!("{} {} files", verb, report.deleted_count())];
    for path in &report.deleted {
        lines.push(format!("  {}", path.display()));
    }
    for (path, reason) in &report.failed {
        lines.push(format!("  failed {}: {}", path.display(), reason));
    }
    lines.join("\n")
}

pub fn map_summary(map: &AssetMap) -> String {
    format!("{} images, {} videos", map.images.len(), map.videos.len())
}

fn relative(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::models::AssetKind;
    use atelier_services::UploadFailure;

    fn base_env(key: &str) -> Option<String> {
        match key {
            "MIGRATION_PROJECT_ROOT" => Some("/srv/site".to_string()),
            "MIGRATION_IMAGES_FOLDER" => Some("cdn/images".to_string()),
            _ => None,
        }
    }

    #[test]
    fn overrides_win_over_environment() {
        let mut overrides = Overrides::new();
        overrides.set("MIGRATION_IMAGES_FOLDER", Some("website/img"));

        let config = config_from(&overrides, base_env).unwrap();
        assert_eq!(config.images_folder, "website/img");
        assert_eq!(config.project_root, PathBuf::from("/srv/site"));
    }

    #[test]
    fn project_root_override_moves_derived_paths() {
        let mut overrides = Overrides::new();
        overrides.set_path("MIGRATION_PROJECT_ROOT", Some(Path::new("/tmp/site")));

        let config = config_from(&overrides, base_env).unwrap();
        assert_eq!(config.images_dir, PathBuf::from("/tmp/site/public/images"));
        assert_eq!(
            config.asset_map_path,
            PathBuf::from("/tmp/site/scripts/asset-map.json")
        );
    }

    #[test]
    fn unset_override_falls_back() {
        let mut overrides = Overrides::new();
        overrides.set("MIGRATION_UPLOAD_CONCURRENCY", None::<usize>);

        let config = config_from(&overrides, base_env).unwrap();
        assert_eq!(config.upload_concurrency, 4);
    }

    #[test]
    fn upload_summary_lists_failures() {
        let mut map = AssetMap::new();
        map.insert(AssetKind::Image, "hero.jpg", "https://cdn.test/hero.jpg");
        let report = UploadReport {
            map,
            failures: vec![UploadFailure {
                kind: AssetKind::Video,
                filename: "intro.mp4".to_string(),
                reason: "timeout".to_string(),
            }],
        };

        let summary = upload_summary(&report, Path::new("scripts/asset-map.json"));
        assert!(summary.starts_with("Uploaded 1 images and 0 videos"));
        assert!(summary.contains("1 files failed:"));
        assert!(summary.contains("video intro.mp4: timeout"));
    }

    #[test]
    fn cleanup_summary_marks_dry_run() {
        let report = CleanupReport {
            deleted: vec![PathBuf::from("public/images/hero.jpg")],
            failed: Vec::new(),
            dry_run: true,
        };
        assert!(cleanup_summary(&report).starts_with("Would delete 1 files"));
    }

    #[test]
    fn rewrite_summary_uses_relative_paths() {
        let report = RewriteReport {
            files_scanned: 3,
            files_changed: 1,
            replacements: 2,
            changed: vec![PathBuf::from("/srv/site/src/App.jsx")],
        };
        let summary = rewrite_summary(&report, Path::new("/srv/site"));
        assert!(summary.contains("Scanned 3 files, rewrote 1 (2 references replaced)"));
        assert!(summary.contains("  src/App.jsx"));
    }
}
