//! Source trait for download-link providers.
//!
//! This module defines the [`LinkSource`] trait implemented by anything
//! that can turn a title's detail-page URL into structured
//! [`DownloadLinks`](crate::types::DownloadLinks). The production
//! implementation is [`AlmasSource`](crate::sources::AlmasSource); the
//! [`LinkWatcher`](crate::watch::LinkWatcher) accepts any implementation,
//! which is also the seam tests use to script fetch outcomes.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{error::Result, types::DownloadLinks};

/// Trait for sources that resolve download links for a title.
///
/// # Required Methods
///
/// * [`id()`](LinkSource::id) - Unique identifier for the source
/// * [`name()`](LinkSource::name) - Human-readable name
/// * [`base_url()`](LinkSource::base_url) - Base URL of the source
/// * [`fetch_links()`](LinkSource::fetch_links) - Resolve links for a
///   detail page
///
/// # Implementation Guidelines
///
/// - Use [`net::ProxyClient`](crate::net::ProxyClient) for HTTP requests
///   so timeouts and cancellation behave uniformly
/// - Honor the cancellation token at every await point; return
///   [`Error::Cancelled`](crate::Error::Cancelled) once it fires
/// - Return detailed errors using the [`Error`](crate::Error) types
///
/// # Examples
///
/// ```rust
/// use almas::prelude::*;
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
///
/// struct StaticSource;
///
/// #[async_trait]
/// impl LinkSource for StaticSource {
///     fn id(&self) -> &'static str { "static" }
///     fn name(&self) -> &'static str { "Static Links" }
///     fn base_url(&self) -> &str { "https://example.com" }
///
///     async fn fetch_links(
///         &self,
///         _detail_url: &str,
///         _cancel: &CancellationToken,
///     ) -> Result<DownloadLinks> {
///         Ok(DownloadLinks::Movie(vec![]))
///     }
/// }
/// ```
#[async_trait]
pub trait LinkSource: Send + Sync {
    /// Returns the unique identifier for this source.
    ///
    /// The ID should be a lowercase, hyphen-separated string. It is used
    /// for rate-limit bookkeeping and log context.
    fn id(&self) -> &'static str;

    /// Returns the human-readable name of this source.
    fn name(&self) -> &'static str;

    /// Returns the base URL of this source, without a trailing slash.
    fn base_url(&self) -> &str;

    /// Resolves the download links behind a title's detail page.
    ///
    /// # Parameters
    ///
    /// * `detail_url` - Full URL of the title's detail page on this source
    /// * `cancel` - Token that aborts the fetch when fired
    ///
    /// # Errors
    ///
    /// * [`Error::Cancelled`](crate::Error::Cancelled) - Token fired or
    ///   timeout elapsed
    /// * [`Error::Parse`](crate::Error::Parse) - Page markup missing the
    ///   expected structure
    /// * [`Error::Source`](crate::Error::Source) - Source-specific
    ///   failures such as empty response bodies
    /// * [`Error::Network`](crate::Error::Network) /
    ///   [`Error::Status`](crate::Error::Status) - Transport and HTTP
    ///   failures
    async fn fetch_links(
        &self,
        detail_url: &str,
        cancel: &CancellationToken,
    ) -> Result<DownloadLinks>;
}
