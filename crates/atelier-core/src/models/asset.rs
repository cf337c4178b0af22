use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of media handled by the migration workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Video,
}

impl AssetKind {
    pub const ALL: [AssetKind; 2] = [AssetKind::Image, AssetKind::Video];

    /// Key of this kind's section in the asset map document
    pub fn section(&self) -> &'static str {
        match self {
            AssetKind::Image => "images",
            AssetKind::Video => "videos",
        }
    }

    /// Path prefix local references use in source files
    pub fn local_prefix(&self) -> &'static str {
        match self {
            AssetKind::Image => "/images/",
            AssetKind::Video => "/video/",
        }
    }

    /// Local path a file of this kind is referenced by, e.g. `/images/logo.png`
    pub fn local_path(&self, filename: &str) -> String {
        format!("{}{}", self.local_prefix(), filename)
    }

    /// Content type to upload `filename` with, guessed from its extension
    pub fn content_type_for(&self, filename: &str) -> &'static str {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match (self, ext.as_deref()) {
            (AssetKind::Image, Some("png")) => "image/png",
            (AssetKind::Image, Some("jpg" | "jpeg")) => "image/jpeg",
            (AssetKind::Image, Some("gif")) => "image/gif",
            (AssetKind::Image, Some("webp")) => "image/webp",
            (AssetKind::Image, Some("avif")) => "image/avif",
            (AssetKind::Image, Some("svg")) => "image/svg+xml",
            (AssetKind::Image, Some("ico")) => "image/x-icon",
            (AssetKind::Video, Some("mp4" | "m4v")) => "video/mp4",
            (AssetKind::Video, Some("webm")) => "video/webm",
            (AssetKind::Video, Some("mov")) => "video/quicktime",
            (AssetKind::Video, Some("ogv" | "ogg")) => "video/ogg",
            (AssetKind::Video, Some("mkv")) => "video/x-matroska",
            _ => "application/octet-stream",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Image => write!(f, "image"),
            AssetKind::Video => write!(f, "video"),
        }
    }
}

impl FromStr for AssetKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "image" | "images" => Ok(AssetKind::Image),
            "video" | "videos" => Ok(AssetKind::Video),
            other => Err(anyhow::anyhow!("Unknown asset kind: {}", other)),
        }
    }
}

/// One migrated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    pub original_filename: String,
    pub remote_url: String,
    pub kind: AssetKind,
}

/// Filename to remote URL mapping produced by an upload run.
///
/// Serialized as `{"images": {...}, "videos": {...}}`; `BTreeMap` keeps the keys
/// sorted so the file diffs cleanly between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMap {
    #[serde(default)]
    pub images: BTreeMap<String, String>,
    #[serde(default)]
    pub videos: BTreeMap<String, String>,
}

impl AssetMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self, kind: AssetKind) -> &BTreeMap<String, String> {
        match kind {
            AssetKind::Image => &self.images,
            AssetKind::Video => &self.videos,
        }
    }

    pub fn section_mut(&mut self, kind: AssetKind) -> &mut BTreeMap<String, String> {
        match kind {
            AssetKind::Image => &mut self.images,
            AssetKind::Video => &mut self.videos,
        }
    }

    pub fn insert(&mut self, kind: AssetKind, filename: impl Into<String>, url: impl Into<String>) {
        self.section_mut(kind).insert(filename.into(), url.into());
    }

    pub fn contains(&self, kind: AssetKind, filename: &str) -> bool {
        self.section(kind).contains_key(filename)
    }

    pub fn records(&self) -> impl Iterator<Item = AssetRecord> + '_ {
        AssetKind::ALL.into_iter().flat_map(move |kind| {
            self.section(kind).iter().map(move |(name, url)| AssetRecord {
                original_filename: name.clone(),
                remote_url: url.clone(),
                kind,
            })
        })
    }

    pub fn len(&self) -> usize {
        self.images.len() + self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.videos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_has_both_sections() {
        let mut map = AssetMap::new();
        map.insert(AssetKind::Image, "logo.png", "https://cdn/x/logo.png");

        let value = serde_json::to_value(&map).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(value["images"]["logo.png"], "https://cdn/x/logo.png");
        assert!(value["videos"].as_object().unwrap().is_empty());
    }

    #[test]
    fn missing_section_defaults_to_empty() {
        let map: AssetMap =
            serde_json::from_str(r#"{"images": {"logo.png": "https://cdn/x/logo.png"}}"#).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.videos.is_empty());
    }

    #[test]
    fn records_cover_both_kinds() {
        let mut map = AssetMap::new();
        map.insert(AssetKind::Image, "a.png", "https://cdn/a.png");
        map.insert(AssetKind::Video, "intro.mp4", "https://cdn/intro.mp4");

        let records: Vec<_> = map.records().collect();
        assert_eq!(records.len(), 2);
        assert!(records
            .iter()
            .any(|r| r.kind == AssetKind::Video && r.original_filename == "intro.mp4"));
    }

    #[test]
    fn kinds_have_distinct_local_prefixes() {
        assert_eq!(AssetKind::Image.local_path("a.png"), "/images/a.png");
        assert_eq!(AssetKind::Video.local_path("b.mp4"), "/video/b.mp4");
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(AssetKind::Image.content_type_for("Hero.JPG"), "image/jpeg");
        assert_eq!(AssetKind::Video.content_type_for("reel.webm"), "video/webm");
        assert_eq!(
            AssetKind::Video.content_type_for("notes"),
            "application/octet-stream"
        );
    }
}
