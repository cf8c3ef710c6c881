//! Core data types for download-link aggregation.
//!
//! This module defines the fundamental data structures used throughout the
//! crate for representing scraped download options:
//!
//! - [`ContentKind`] - Whether a detail page belongs to a movie or a series
//! - [`Quality`] - One download option at a specific quality
//! - [`Season`] - One season of an episodic title with its options
//! - [`DownloadLinks`] - The tagged scrape result carrying either shape
//!
//! The serde shapes mirror the JSON the original service emitted, so a
//! serialized [`DownloadLinks`] value reads as
//! `{"type": "movie"|"series", "result": [...]}`.
//!
//! # Examples
//!
//! ```rust
//! use almas::types::{DownloadLinks, Quality};
//!
//! let links = DownloadLinks::Movie(vec![Quality {
//!     quality: "1080p WEB-DL".to_string(),
//!     size: Some("1.9GB".to_string()),
//!     download_link: Some("https://cdn.example/film.1080p.web-dl.mkv".to_string()),
//!     subtitle_link: None,
//!     info: None,
//! }]);
//! assert!(!links.is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::release::ReleaseInfo;

/// The kind of title behind a detail page.
///
/// Derived during target resolution from the shape of the page's alternate
/// JSON link: hrefs containing `/series/` are series, everything else is a
/// movie.
///
/// # Examples
///
/// ```rust
/// use almas::types::ContentKind;
///
/// assert_eq!(ContentKind::Series.as_str(), "series");
/// assert_eq!(ContentKind::Series.posttype(), "tvshow");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// A single film with per-quality download entries.
    Movie,
    /// An episodic title with per-season link groups.
    Series,
}

impl ContentKind {
    /// Returns the lowercase name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Movie => "movie",
            ContentKind::Series => "series",
        }
    }

    /// Returns the `posttype` form value the download-links endpoint
    /// expects for this kind.
    ///
    /// The endpoint's vocabulary is `tvshow`, not `series`.
    pub fn posttype(&self) -> &'static str {
        match self {
            ContentKind::Movie => "movie",
            ContentKind::Series => "tvshow",
        }
    }
}

/// One download option at a specific quality.
///
/// Produced by the extraction strategies. Both links are positional in the
/// scraped markup, so either may be absent independently.
///
/// # Fields
///
/// * `quality` - Quality label as printed on the page
/// * `size` - File size text when the page lists one
/// * `download_link` - Direct download link
/// * `subtitle_link` - Persian subtitle link for this quality
/// * `info` - Classification derived from the download link's filename
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quality {
    /// Quality label, e.g. `1080p WEB-DL`
    pub quality: String,

    /// File size text, e.g. `1.9GB`
    pub size: Option<String>,

    /// Direct download link
    #[serde(rename = "downloadLink")]
    pub download_link: Option<String>,

    /// Persian subtitle link
    #[serde(rename = "subtitleLink")]
    pub subtitle_link: Option<String>,

    /// Release classification for the download link
    pub info: Option<ReleaseInfo>,
}

/// One season of an episodic title with its download options.
///
/// # Fields
///
/// * `season` - Season number, parsed from the heading text or positional
///   when the heading carries no digits
/// * `qualities` - Download options listed under this season's heading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    /// Season number
    pub season: u32,

    /// Download options for this season
    pub qualities: Vec<Quality>,
}

/// The outcome of a link scrape: movie qualities or series seasons.
///
/// Serializes as a tagged object so consumers see the wire shape the
/// original service produced:
///
/// ```rust
/// use almas::types::DownloadLinks;
///
/// let links = DownloadLinks::Movie(vec![]);
/// let json = serde_json::to_string(&links).unwrap();
/// assert_eq!(json, r#"{"type":"movie","result":[]}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "result", rename_all = "lowercase")]
pub enum DownloadLinks {
    /// Per-quality entries for a movie.
    Movie(Vec<Quality>),
    /// Per-season link groups for a series.
    Series(Vec<Season>),
}

impl DownloadLinks {
    /// Returns the kind of content these links belong to.
    pub fn kind(&self) -> ContentKind {
        match self {
            DownloadLinks::Movie(_) => ContentKind::Movie,
            DownloadLinks::Series(_) => ContentKind::Series,
        }
    }

    /// Returns `true` when extraction produced no entries at all.
    ///
    /// An empty result is not an error; pages occasionally publish no
    /// links yet.
    pub fn is_empty(&self) -> bool {
        match self {
            DownloadLinks::Movie(qualities) => qualities.is_empty(),
            DownloadLinks::Series(seasons) => seasons.is_empty(),
        }
    }
}
