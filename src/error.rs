//! Error types and result handling for almas operations.
//!
//! This module defines the error handling system used throughout the crate.
//! All operations return a [`Result<T>`] which is a type alias for
//! `std::result::Result<T, Error>`.
//!
//! # Error Categories
//!
//! - **Network Errors**: Connection issues and HTTP transport errors
//! - **Status Errors**: Responses outside the 2xx range
//! - **Parse Errors**: Invalid HTML or missing required markup
//! - **Source Errors**: Scrape-target-specific errors with context
//! - **Cancelled**: A fetch that was superseded, dropped, or timed out
//! - **JSON Errors**: Serialization/deserialization failures
//! - **URL Errors**: Malformed endpoint URLs
//!
//! # Examples
//!
//! ```rust
//! use almas::{Error, Result};
//!
//! fn report(outcome: Result<String>) {
//!     match outcome {
//!         Ok(html) => println!("fetched {} bytes", html.len()),
//!         Err(Error::Cancelled) => {} // superseded fetches are not failures
//!         Err(Error::Parse(msg)) => eprintln!("unusable page: {msg}"),
//!         Err(e) => eprintln!("fetch failed: {e}"),
//!     }
//! }
//! # report(Ok(String::new()));
//! ```

use thiserror::Error;

/// Type alias for Results with almas errors.
///
/// This is a convenience type alias that represents the standard Result type
/// with almas's [`enum@Error`] as the error type. All public APIs in this
/// crate return this Result type.
///
/// # Examples
///
/// ```rust
/// use almas::{Result, Error};
///
/// fn example_operation() -> Result<String> {
///     Ok("Success".to_string())
/// }
///
/// fn example_with_error() -> Result<()> {
///     Err(Error::parse("Something went wrong"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all almas operations.
///
/// This enum covers the error conditions that can occur while fetching
/// metadata or scraping download links, from network issues to parsing
/// failures. Each variant provides specific context about what went wrong.
#[derive(Error, Debug)]
pub enum Error {
    /// Network-related errors from HTTP operations.
    ///
    /// This variant wraps errors from the underlying HTTP client (reqwest),
    /// including connection failures, DNS resolution failures, and TLS
    /// errors.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A response arrived but its status was outside the 2xx range.
    ///
    /// The wrapped [`reqwest::StatusCode`] displays as the numeric code
    /// followed by the canonical reason phrase, so the rendered message
    /// reads like `HTTP 404 Not Found`.
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    /// HTML parsing and data format errors.
    ///
    /// This variant is used when a fetched page cannot be interpreted as
    /// expected, such as a detail page without the alternate JSON link or
    /// an alternate link whose href carries no post id.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use almas::Error;
    ///
    /// let error = Error::parse("could not extract JSON info from page");
    /// ```
    #[error("Parse error: {0}")]
    Parse(String),

    /// Source-specific errors with contextual information.
    ///
    /// This variant provides detailed error information when a scrape
    /// target misbehaves in a way that is not a transport or parse
    /// problem, such as returning an empty body for a page that exists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use almas::Error;
    ///
    /// let error = Error::source("almas", "empty response for detail page");
    /// ```
    #[error("Source error [{src}]: {message}")]
    Source { src: String, message: String },

    /// The fetch was cancelled before it settled.
    ///
    /// Raised when the request's cancellation token fires (a newer fetch
    /// superseded it, or its owner was dropped) and when the per-request
    /// timeout elapses. The two are deliberately indistinguishable here;
    /// [`LinkWatcher`](crate::watch::LinkWatcher) treats both as silence.
    #[error("request cancelled")]
    Cancelled,

    /// JSON serialization and deserialization errors.
    ///
    /// This variant wraps errors from serde_json when decoding metadata
    /// responses into their typed schemas.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed URL errors.
    ///
    /// This variant wraps errors from building or joining endpoint URLs.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Creates a parse error with the given message.
    ///
    /// # Parameters
    ///
    /// * `msg` - A message describing the parsing error
    ///
    /// # Examples
    ///
    /// ```rust
    /// use almas::Error;
    ///
    /// let error = Error::parse("no id found in alternate link");
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Creates a source-specific error with source ID and message.
    ///
    /// # Parameters
    ///
    /// * `src` - The identifier of the source that encountered the error
    /// * `msg` - A message describing what went wrong
    ///
    /// # Examples
    ///
    /// ```rust
    /// use almas::Error;
    ///
    /// let error = Error::source("almas", "empty download fragment");
    /// ```
    pub fn source(src: impl Into<String>, msg: impl Into<String>) -> Self {
        Error::Source {
            src: src.into(),
            message: msg.into(),
        }
    }

    /// Creates a status error from a non-2xx response code.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use almas::Error;
    ///
    /// let error = Error::status(reqwest::StatusCode::NOT_FOUND);
    /// assert_eq!(error.to_string(), "HTTP 404 Not Found");
    /// ```
    pub fn status(status: reqwest::StatusCode) -> Self {
        Error::Status(status)
    }

    /// Returns `true` when this error is the silent cancellation marker.
    ///
    /// Callers that reproduce the original fetch semantics swallow these
    /// instead of surfacing them.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}
