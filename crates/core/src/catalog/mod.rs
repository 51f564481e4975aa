//! Video catalog - the static, build-time list of browsable videos.
//!
//! The catalog is loaded once at process start, either from the JSON file
//! embedded in the crate or from a file named in `[catalog] path`, and is
//! never mutated afterwards.

mod types;

pub use types::*;

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Duplicate video id in catalog: {0}")]
    DuplicateId(VideoId),
}

/// Immutable, ordered sequence of catalog videos.
#[derive(Debug, Clone)]
pub struct Catalog {
    videos: Vec<Video>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(videos: Vec<Video>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(videos.len());
        for video in &videos {
            if !seen.insert(&video.id) {
                return Err(CatalogError::DuplicateId(video.id.clone()));
            }
        }
        Ok(Self { videos })
    }

    /// Parse a catalog from a JSON array of videos.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let videos: Vec<Video> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(videos)
    }

    /// The catalog shipped with the crate.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load from `path` if given, otherwise fall back to the embedded catalog.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let Some(path) = path else {
            return Self::embedded();
        };

        debug!("Loading catalog from {:?}", path);
        let json = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub fn get(&self, id: &VideoId) -> Option<&Video> {
        self.videos.iter().find(|v| &v.id == id)
    }

    pub fn contains(&self, id: &VideoId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}
