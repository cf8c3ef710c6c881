//! HTML parsing utilities for scraped pages.
//!
//! This module provides small helpers over the `scraper` crate used by the
//! extraction code: parsing a page into a queryable document and reading
//! element text and attributes.
//!
//! # Examples
//!
//! ```rust
//! use almas::net::html;
//! use scraper::Selector;
//!
//! let document = html::parse(r#"<h3>1080p WEB-DL / 1.9GB</h3>"#);
//! let selector = Selector::parse("h3").unwrap();
//! let heading = document.select(&selector).next().unwrap();
//! assert_eq!(html::element_text(&heading), "1080p WEB-DL / 1.9GB");
//! ```

use scraper::{ElementRef, Html};

/// Parses an HTML document from a string.
///
/// Works for full pages and for server-rendered fragments alike; fragments
/// are wrapped in an implicit document.
///
/// # Examples
///
/// ```rust
/// use almas::net::html;
///
/// let document = html::parse("<div><p>Hello World</p></div>");
/// # let _ = document;
/// ```
pub fn parse(html: &str) -> Html {
    Html::parse_document(html)
}

/// Collects the full text content of an element, untrimmed.
///
/// The equivalent of the DOM's `textContent`: all descendant text nodes
/// joined in document order. Callers trim where the surrounding markup
/// makes whitespace meaningless.
pub fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>()
}

/// Reads an attribute value from an element.
pub fn element_attr<'a>(element: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// Compares an attribute value against an expected string, ignoring ASCII
/// case. Missing attributes never match.
///
/// # Examples
///
/// ```rust
/// use almas::net::html;
/// use scraper::Selector;
///
/// let document = html::parse(r#"<link rel="ALTERNATE" href="/movie/99/">"#);
/// let selector = Selector::parse("link").unwrap();
/// let link = document.select(&selector).next().unwrap();
/// assert!(html::attr_eq_ignore_case(&link, "rel", "alternate"));
/// assert!(!html::attr_eq_ignore_case(&link, "title", "json"));
/// ```
pub fn attr_eq_ignore_case(element: &ElementRef, name: &str, expected: &str) -> bool {
    element
        .value()
        .attr(name)
        .is_some_and(|value| value.eq_ignore_ascii_case(expected))
}
