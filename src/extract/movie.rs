//! Movie extraction: per-quality download entries.
//!
//! Movie fragments list one `<h3>` heading per quality tier, each followed
//! by a container of action anchors. [`extract`] tries the DOM strategy
//! first and falls back to raw-regex scanning when no heading matches,
//! which keeps badly broken markup from producing nothing at all.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::net::html;
use crate::types::Quality;

use super::{DOWNLOAD_PHRASE, ExtractionStrategy, SUBTITLE_PHRASE, build_quality, strip_tags};

/// Markers identifying a quality heading.
static QUALITY_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(HD|4K|480|720|1080|کیفیت)").expect("valid pattern"));

static H3: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").expect("valid selector"));
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid selector"));

/// Heading/container pairs in raw markup, for the fallback path.
static HEADING_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<h3[^>]*>(.*?)</h3>.*?<div[^>]*>(.*?)</div>").expect("valid pattern")
});

/// Download/subtitle anchors in raw markup, matched by their exact text.
static ACTION_ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"<a[^>]*href="([^"]+)"[^>]*>(?:{DOWNLOAD_PHRASE}|{SUBTITLE_PHRASE})</a>"#
    ))
    .expect("valid pattern")
});

/// DOM-walking strategy: parse the fragment, find quality headings, and
/// read the action anchors out of each heading's following container.
pub struct DomStrategy;

impl ExtractionStrategy for DomStrategy {
    fn extract(&self, fragment: &str) -> Vec<Quality> {
        let document = html::parse(fragment);
        document
            .select(&H3)
            .filter(|heading| QUALITY_MARKER.is_match(&html::element_text(heading)))
            .map(|heading| {
                let label = html::element_text(&heading);
                let links = action_links(&heading);
                build_quality(label.trim(), &links)
            })
            .collect()
    }
}

/// Collects action-anchor hrefs from the element following a heading.
///
/// Anchors are matched by their visible text. A matching anchor without an
/// href still takes up its position in the result.
fn action_links(heading: &ElementRef) -> Vec<String> {
    let mut links = Vec::new();
    let container = heading.next_siblings().filter_map(ElementRef::wrap).next();

    if let Some(container) = container {
        for anchor in container.select(&ANCHOR) {
            let text = html::element_text(&anchor);
            if text.contains(DOWNLOAD_PHRASE) || text.contains(SUBTITLE_PHRASE) {
                links.push(html::element_attr(&anchor, "href").unwrap_or("").to_string());
            }
        }
    }

    links
}

/// Raw-regex strategy over the unparsed fragment.
///
/// Scans heading/container pairs textually. Unlike [`DomStrategy`] it does
/// not filter headings by quality markers, so it accepts anything shaped
/// like a quality block.
pub struct RegexStrategy;

impl ExtractionStrategy for RegexStrategy {
    fn extract(&self, fragment: &str) -> Vec<Quality> {
        HEADING_BLOCK
            .captures_iter(fragment)
            .map(|block| {
                let label = strip_tags(block.get(1).map_or("", |m| m.as_str()));
                let container = block.get(2).map_or("", |m| m.as_str());
                let links: Vec<String> = ACTION_ANCHOR
                    .captures_iter(container)
                    .filter_map(|anchor| anchor.get(1))
                    .map(|href| href.as_str().to_string())
                    .collect();
                build_quality(label.trim(), &links)
            })
            .collect()
    }
}

/// Extracts per-quality movie entries from a download fragment.
///
/// Empty input yields an empty list. Otherwise the DOM strategy runs
/// first; when it matches no headings, the regex fallback takes over.
///
/// # Examples
///
/// ```rust
/// use almas::extract::movie;
///
/// let fragment = r#"
///     <h3>1080p WEB-DL / 1.9GB</h3>
///     <div>
///         <a href="https://cdn.example/film.1080p.web-dl.mkv">دانلود فیلم با این کیفیت</a>
///         <a href="https://cdn.example/film.srt">دانلود زیرنویس فارسی این کیفیت</a>
///     </div>
/// "#;
///
/// let entries = movie::extract(fragment);
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].quality, "1080p WEB-DL");
/// assert_eq!(entries[0].size.as_deref(), Some("1.9GB"));
/// ```
pub fn extract(fragment: &str) -> Vec<Quality> {
    if fragment.is_empty() {
        return Vec::new();
    }

    let entries = DomStrategy.extract(fragment);
    if !entries.is_empty() {
        return entries;
    }

    log::debug!("movie DOM extraction matched nothing, trying regex fallback");
    RegexStrategy.extract(fragment)
}
