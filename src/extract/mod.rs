//! Extraction of download options from scraped HTML fragments.
//!
//! The download-links endpoint returns a server-rendered HTML fragment, not
//! JSON. This module turns that markup into structured values:
//!
//! - [`movie`] - per-quality entries under `<h3>` quality headings
//! - [`series`] - per-season groups under `<h3>` season headings
//!
//! Movie extraction runs two [`ExtractionStrategy`] implementations in fixed
//! order: a DOM walk first, then a raw-regex fallback for markup too broken
//! to parse. Both strategies funnel through the same label-splitting and
//! entry-building helpers here, so an entry looks identical regardless of
//! which strategy produced it.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::release::classify;
use crate::types::Quality;

pub mod movie;
pub mod series;

pub use movie::{DomStrategy, RegexStrategy};

/// A way of pulling per-quality entries out of a fragment.
///
/// Implementations must be pure over their input: same fragment, same
/// entries, in document order.
pub trait ExtractionStrategy {
    /// Extracts download options from the fragment markup.
    fn extract(&self, html: &str) -> Vec<Quality>;
}

/// Anchor text marking a download link.
pub(crate) const DOWNLOAD_PHRASE: &str = "دانلود فیلم با این کیفیت";

/// Anchor text marking a Persian subtitle link.
pub(crate) const SUBTITLE_PHRASE: &str = "دانلود زیرنویس فارسی این کیفیت";

/// Splits a heading like `1080p WEB-DL / 1.9GB` into label and size.
static LABEL_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s/\s").expect("valid pattern"));

/// Strips markup when a label is captured from raw HTML.
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid pattern"));

/// Splits a quality heading into its label and optional size.
///
/// The page prints both on one line separated by ` / `. A missing or empty
/// label falls back to `unknown`; a missing or empty size becomes `None`.
/// Extra ` / `-separated tail parts are ignored.
pub(crate) fn split_label(text: &str) -> (String, Option<String>) {
    let mut parts = LABEL_SPLIT.split(text);
    let quality = parts.next().unwrap_or("").trim();
    let size = parts
        .next()
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty());

    let quality = if quality.is_empty() {
        "unknown".to_string()
    } else {
        quality.to_string()
    };
    (quality, size)
}

/// Removes all tags from an HTML snippet, leaving its text.
pub(crate) fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, "").into_owned()
}

/// Builds one entry from a heading label and the links collected under it.
///
/// Links are positional: the first is the download link, the second the
/// subtitle link. Empty slots (an anchor without an href) count for
/// position but surface as `None`. Classification always runs on the
/// download link, or on the empty string when there is none.
pub(crate) fn build_quality(label: &str, links: &[String]) -> Quality {
    let (quality, size) = split_label(label);
    let download_link = links.first().filter(|link| !link.is_empty()).cloned();
    let subtitle_link = links.get(1).filter(|link| !link.is_empty()).cloned();
    let info = classify(download_link.as_deref().unwrap_or(""));

    Quality {
        quality,
        size,
        download_link,
        subtitle_link,
        info: Some(info),
    }
}
