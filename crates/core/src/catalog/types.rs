use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Catalog identifier of a video, in canonical string form.
///
/// Bookmark rows may carry the id as a JSON string or integer; both are
/// coerced to the same canonical form on deserialization so that `7` and
/// `"7"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VideoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for VideoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for VideoId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVideoId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl<'de> Deserialize<'de> for VideoId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawVideoId::deserialize(deserializer)? {
            RawVideoId::Text(s) => VideoId(s),
            RawVideoId::Signed(n) => VideoId(n.to_string()),
            RawVideoId::Unsigned(n) => VideoId(n.to_string()),
        })
    }
}

/// Video category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Movie,
    #[serde(rename = "TV Series")]
    TvSeries,
}

impl Category {
    /// Label used in headings ("Movies", "TV series").
    pub fn plural_label(&self) -> &'static str {
        match self {
            Category::Movie => "Movies",
            Category::TvSeries => "TV series",
        }
    }
}

/// Thumbnail set for the trending carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingThumbnail {
    pub small: String,
    pub large: String,
}

/// Thumbnail set for regular grid cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegularThumbnail {
    pub small: String,
    pub medium: String,
    pub large: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trending: Option<TrendingThumbnail>,
    pub regular: RegularThumbnail,
}

/// A catalog entry. Defined at build time and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub thumbnail: Thumbnail,
    /// Media reference (path or URL of the playable asset).
    pub video: String,
    pub year: u16,
    pub category: Category,
    /// Age rating, e.g. "PG", "E", "18+".
    pub rating: String,
    /// Static default for the bookmark flag before any sync.
    #[serde(default)]
    pub is_bookmarked: bool,
    #[serde(default)]
    pub is_trending: bool,
}
