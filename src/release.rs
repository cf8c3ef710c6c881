//! Release classification from download-link filenames.
//!
//! Scene-style release names encode resolution, rip source, audio layout,
//! and encoder group as loose substrings (`Film.2019.1080p.WEB-DL.x265.PSA`).
//! [`classify`] derives a structured [`ReleaseInfo`] from such a string with
//! pure substring matching: no I/O, no allocation beyond the result, and the
//! same output for the same input every time.
//!
//! Labels are bilingual because the consuming UIs render both English and
//! Farsi text.
//!
//! # Examples
//!
//! ```rust
//! use almas::release::classify;
//!
//! let info = classify("Interstellar.2014.720p.WEB-DL.YIFY.mkv");
//! assert_eq!(info.quality.en, "720p");
//! assert_eq!(info.source.en, "WEB-DL");
//! assert_eq!(info.source.fa, "وب-دی‌ال");
//! assert_eq!(info.encoder, "yify");
//! assert!(!info.dubbed);
//! ```

use serde::{Deserialize, Serialize};

/// A display label in English and Farsi.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// English text
    pub en: String,
    /// Farsi text
    pub fa: String,
}

impl Label {
    /// Creates a label from an English/Farsi pair.
    pub fn new(en: impl Into<String>, fa: impl Into<String>) -> Self {
        Label {
            en: en.into(),
            fa: fa.into(),
        }
    }

    /// The bilingual sentinel used when no rule matches.
    pub fn unknown() -> Self {
        Label::new("Unknown", "نامشخص")
    }
}

/// Structured release information derived from a filename.
///
/// # Fields
///
/// * `quality` - Resolution tier (4K down to 240p)
/// * `source` - Rip source (BluRay, WEB-DL, CAM, ...)
/// * `audio` - Audio layout (5.1, stereo, Atmos, ...)
/// * `encoder` - Release-group name from a known allowlist, or `unknown`
/// * `dubbed` - Persian dub or dual-audio markers present
/// * `bit10` - 10-bit color depth
/// * `imax` - IMAX cut
/// * `x265` - x265/HEVC encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    /// Resolution tier
    pub quality: Label,

    /// Rip source
    pub source: Label,

    /// Audio layout
    pub audio: Label,

    /// Release group, `unknown` when not recognized
    pub encoder: String,

    /// Persian dub or dual audio
    pub dubbed: bool,

    /// 10-bit color depth
    pub bit10: bool,

    /// IMAX cut
    pub imax: bool,

    /// x265/HEVC encoding
    pub x265: bool,
}

/// One cascade rule: any of the needles maps to the (en, fa) label pair.
type Rule = (&'static [&'static str], (&'static str, &'static str));

// Ordered cascades; the first matching rule wins.
const QUALITY_RULES: &[Rule] = &[
    (&["2160p", "4k"], ("4K", "۴کی")),
    (&["1440p", "2k"], ("2K", "۲کی")),
    (&["1080p"], ("1080p", "۱۰۸۰p")),
    (&["720p"], ("720p", "۷۲۰p")),
    (&["480p"], ("480p", "۴۸۰p")),
    (&["360p"], ("360p", "۳۶۰p")),
    (&["240p"], ("240p", "۲۴۰p")),
];

const SOURCE_RULES: &[Rule] = &[
    (&["bluray"], ("BluRay", "بلوری")),
    (&["brrip"], ("BRRip", "بی‌ریپ")),
    (&["webrip"], ("WEBRip", "وب‌ریپ")),
    (&["web-dl", "webdl"], ("WEB-DL", "وب-دی‌ال")),
    (&["hdrip"], ("HDRip", "اچ‌دی‌ریپ")),
    (&["dvdrip"], ("DVDRip", "دی‌وی‌دی‌ریپ")),
    (&["cam"], ("CAM", "کَم (دوربینی)")),
];

const AUDIO_RULES: &[Rule] = &[
    (&["5.1", "aac5.1", "5ch"], ("5.1 Channels", "۵.۱ کانال")),
    (&["7.1", "aac7.1", "7ch"], ("7.1 Channels", "۷.۱ کانال")),
    (&["6ch", "aac6.0"], ("6 Channels", "۶ کانال")),
    (&["2.0", "aac2.0", "2ch"], ("2 Channels", "۲ کانال")),
    (&["stereo"], ("Stereo", "استریو")),
    (&["aac"], ("AAC Audio", "صدای AAC")),
    (&["dts"], ("DTS Audio", "صدای DTS")),
    (&["truehd"], ("Dolby TrueHD", "دالبی TrueHD")),
    (&["atmos"], ("Dolby Atmos", "دالبی اتموس")),
];

const DUB_MARKERS: &[&str] = &["dubbed", "dual audio", "dual-audio", "farsi", "persian"];

/// Release groups recognized in link filenames, all lowercase.
const ENCODERS: &[&str] = &[
    "ganool", "pahe", "tigole", "yify", "rarbg", "ettv", "shaanig", "anoxmous", "juggs", "nimitmak",
];

const UNKNOWN_ENCODER: &str = "unknown";

fn match_label(haystack: &str, rules: &[Rule]) -> Label {
    for &(needles, (en, fa)) in rules {
        if needles.iter().any(|needle| haystack.contains(needle)) {
            return Label::new(en, fa);
        }
    }
    Label::unknown()
}

/// Classifies a release filename (or link) into structured [`ReleaseInfo`].
///
/// Matching is case-insensitive over the whole string, so full URLs work as
/// well as bare filenames. Unmatched cascades yield the bilingual unknown
/// sentinel; an unrecognized release group yields the `unknown` encoder.
///
/// # Parameters
///
/// * `filename` - Release name, filename, or full download link
///
/// # Examples
///
/// ```rust
/// use almas::release::classify;
///
/// let info = classify("https://cdn.example/Dune.2021.2160p.BluRay.Atmos.TiGoLe.mkv");
/// assert_eq!(info.quality.en, "4K");
/// assert_eq!(info.audio.en, "Dolby Atmos");
/// assert_eq!(info.encoder, "tigole");
///
/// let blank = classify("");
/// assert_eq!(blank.quality.en, "Unknown");
/// assert_eq!(blank.quality.fa, "نامشخص");
/// ```
pub fn classify(filename: &str) -> ReleaseInfo {
    let lower = filename.to_lowercase();
    ReleaseInfo {
        quality: match_label(&lower, QUALITY_RULES),
        source: match_label(&lower, SOURCE_RULES),
        audio: match_label(&lower, AUDIO_RULES),
        encoder: ENCODERS
            .iter()
            .copied()
            .find(|group| lower.contains(group))
            .unwrap_or(UNKNOWN_ENCODER)
            .to_string(),
        dubbed: DUB_MARKERS.iter().any(|marker| lower.contains(marker)),
        bit10: lower.contains("10bit"),
        imax: lower.contains("imax"),
        x265: lower.contains("x265") || lower.contains("hevc"),
    }
}
