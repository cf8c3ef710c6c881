//! Series extraction: per-season download groups.
//!
//! Series fragments group entries under one `<h3>` heading per season
//! (`دانلود فصل N`). Everything between a season heading and the next one
//! belongs to that season; within a segment, each download option is a
//! `<button>` label followed by a download anchor and a subtitle anchor
//! identified by their `title` attributes.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::net::html;
use crate::types::Season;

use super::{build_quality, strip_tags};

/// Headings that open a season block.
static SEASON_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)دانلود فصل\s*[0-9]+").expect("valid pattern"));

/// First digit run in a heading, used as the season number.
static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)").expect("valid pattern"));

static H3: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").expect("valid selector"));

/// One download option inside a season segment: quality button, download
/// anchor, subtitle anchor, in that order.
static SEASON_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<button[^>]*>(.*?)</button>.*?<a[^>]*href="([^"]+)"[^>]*title="لینک های دانلود".*?<a[^>]*href="([^"]+)"[^>]*title="زیرنویس ها""#,
    )
    .expect("valid pattern")
});

/// Extracts per-season download groups from a series fragment.
///
/// Season numbers come from the first digit run in each heading, falling
/// back to the heading's position (1-based) when no digits are present. A
/// season whose segment contains no entries is still emitted, with an
/// empty quality list.
///
/// # Examples
///
/// ```rust
/// use almas::extract::series;
///
/// let fragment = r#"
///     <h3>دانلود فصل 1</h3>
///     <div>
///         <button>720p / 400MB</button>
///         <a href="https://cdn.example/s01.720p.web-dl.mkv" title="لینک های دانلود">دانلود</a>
///         <a href="https://cdn.example/s01.srt" title="زیرنویس ها">زیرنویس</a>
///     </div>
/// "#;
///
/// let seasons = series::extract(fragment);
/// assert_eq!(seasons.len(), 1);
/// assert_eq!(seasons[0].season, 1);
/// assert_eq!(seasons[0].qualities[0].quality, "720p");
/// ```
pub fn extract(fragment: &str) -> Vec<Season> {
    if fragment.is_empty() {
        return Vec::new();
    }

    let document = html::parse(fragment);
    let headings: Vec<ElementRef> = document
        .select(&H3)
        .filter(|heading| SEASON_HEADING.is_match(&html::element_text(heading)))
        .collect();

    headings
        .iter()
        .enumerate()
        .map(|(index, heading)| {
            let text = html::element_text(heading);
            let season = FIRST_NUMBER
                .captures(&text)
                .and_then(|captures| captures.get(1))
                .and_then(|number| number.as_str().parse::<u32>().ok())
                .unwrap_or(index as u32 + 1);

            let segment = season_segment(heading);
            let qualities = SEASON_ENTRY
                .captures_iter(&segment)
                .map(|entry| {
                    let label = strip_tags(entry.get(1).map_or("", |m| m.as_str()));
                    let download = entry.get(2).map_or("", |m| m.as_str()).to_string();
                    let subtitle = entry.get(3).map_or("", |m| m.as_str()).to_string();
                    build_quality(label.trim(), &[download, subtitle])
                })
                .collect();

            Season { season, qualities }
        })
        .collect()
}

/// Collects the outer HTML of every element between a season heading and
/// the next one, joined by newlines.
fn season_segment(heading: &ElementRef) -> String {
    let mut parts = Vec::new();
    for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
        if is_season_heading(&sibling) {
            break;
        }
        parts.push(sibling.html());
    }
    parts.join("\n")
}

/// Whether an element is itself one of the matched season headings.
fn is_season_heading(element: &ElementRef) -> bool {
    element.value().name() == "h3" && SEASON_HEADING.is_match(&html::element_text(element))
}
