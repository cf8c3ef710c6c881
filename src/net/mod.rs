//! Network utilities for proxied HTTP requests and rate limiting.
//!
//! This module provides the networking infrastructure for the crate:
//!
//! - **HTTP Client**: A global, configured HTTP client with connection pooling
//! - **CORS Proxy**: Requests are routed through a proxy prefix so the same
//!   flow works from environments that cannot reach the scrape target directly
//! - **Rate Limiting**: Per-source rate limiting to respect website policies
//! - **Cancellation**: Every request races a [`CancellationToken`] and a
//!   per-request timeout
//!
//! # Examples
//!
//! ```rust,no_run
//! use almas::net::ProxyClient;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> almas::Result<()> {
//! let client = ProxyClient::new("almas").with_rate_limit(500);
//! let cancel = CancellationToken::new();
//!
//! let html = client
//!     .get_text("https://almasmovie.website/series/dark", &cancel)
//!     .await?;
//! # Ok(())
//! # }
//! ```

use bytes::Bytes;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use reqwest::{Client, header::HeaderMap};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::{Error, Result};

pub mod html;

/// Public CORS proxy prepended to scrape-target URLs by default.
///
/// The full target URL is URL-encoded and appended to this prefix.
pub const DEFAULT_PROXY: &str = "https://corsproxy.io/?";

/// Default per-request timeout: 15 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Global HTTP client instance with optimized configuration.
///
/// This client is configured with:
/// - Connection pooling (10 idle connections per host)
/// - Compression support (gzip, brotli)
/// - Custom User-Agent header
///
/// Timeouts are enforced per request by [`ProxyClient`], not here, so that
/// an elapsed timeout and a cancelled token surface through the same path.
///
/// The client is created lazily on first use and reused across all HTTP
/// operations.
static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent("almas/0.1.0")
        .pool_max_idle_per_host(10)
        .gzip(true)
        .brotli(true)
        .build()
        .expect("Failed to build HTTP client")
});

/// Returns the process-wide HTTP client.
pub(crate) fn client() -> &'static Client {
    &CLIENT
}

/// Per-source rate limiter to keep request pacing polite.
///
/// The rate limiter tracks the last request time for each source and
/// enforces a minimum delay between requests.
///
/// # Thread Safety
///
/// The rate limiter uses a `Mutex` internally and is safe to use across
/// multiple threads and async tasks.
#[derive(Debug)]
pub struct RateLimiter {
    last_request: Mutex<HashMap<String, Instant>>,
    default_delay: Duration,
}

impl Clone for RateLimiter {
    fn clone(&self) -> Self {
        Self {
            last_request: Mutex::new(HashMap::new()),
            default_delay: self.default_delay,
        }
    }
}

impl RateLimiter {
    /// Creates a new rate limiter with the specified default delay.
    ///
    /// # Parameters
    ///
    /// * `delay_ms` - Minimum delay between requests in milliseconds
    ///
    /// # Examples
    ///
    /// ```rust
    /// use almas::net::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(500);
    /// ```
    pub fn new(delay_ms: u64) -> Self {
        Self {
            last_request: Mutex::new(HashMap::new()),
            default_delay: Duration::from_millis(delay_ms),
        }
    }

    /// Waits if necessary before allowing a request for the specified
    /// source.
    ///
    /// Checks the last request time for the source and sleeps if
    /// insufficient time has passed since the last request.
    ///
    /// # Parameters
    ///
    /// * `source_id` - The identifier of the source making the request
    pub async fn wait(&self, source_id: &str) {
        let now = Instant::now();
        let wait_duration = {
            let last_map = self.last_request.lock();
            if let Some(&last) = last_map.get(source_id) {
                let elapsed = now.duration_since(last);
                if elapsed < self.default_delay {
                    Some(self.default_delay - elapsed)
                } else {
                    None
                }
            } else {
                None
            }
        };

        if let Some(duration) = wait_duration {
            tokio::time::sleep(duration).await;
        }

        self.last_request
            .lock()
            .insert(source_id.to_string(), Instant::now());
    }
}

/// HTTP client wrapper with proxying, rate limiting, timeouts, and
/// cooperative cancellation.
///
/// `ProxyClient` provides the request primitives for scraping: every
/// request is routed through the configured CORS proxy (unless disabled),
/// paced by a per-source rate limiter, bounded by a timeout, and raced
/// against a caller-supplied [`CancellationToken`].
///
/// Cancellation and timeout both yield [`Error::Cancelled`]; callers that
/// reproduce the original fetch semantics treat that error as silence
/// rather than a failure.
///
/// # Examples
///
/// ```rust,no_run
/// use std::time::Duration;
/// use almas::net::ProxyClient;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> almas::Result<()> {
/// let client = ProxyClient::new("almas")
///     .with_timeout(Duration::from_secs(10))
///     .with_rate_limit(1000);
///
/// let cancel = CancellationToken::new();
/// let html = client
///     .get_text("https://almasmovie.website/movies/dune", &cancel)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ProxyClient {
    source_id: String,
    proxy: Option<String>,
    timeout: Duration,
    rate_limiter: RateLimiter,
    headers: HeaderMap,
}

impl ProxyClient {
    /// Creates a new client for the specified source.
    ///
    /// The client is initialized with sensible defaults:
    /// - routed through [`DEFAULT_PROXY`]
    /// - 15 second request timeout
    /// - 200ms rate limit delay
    ///
    /// # Parameters
    ///
    /// * `source_id` - Identifier for the source (used for rate limiting
    ///   and log context)
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            proxy: Some(DEFAULT_PROXY.to_string()),
            timeout: DEFAULT_TIMEOUT,
            rate_limiter: RateLimiter::new(200), // 200ms default
            headers: HeaderMap::new(),
        }
    }

    /// Sets the CORS proxy prefix for this client.
    ///
    /// The target URL is URL-encoded and appended to the prefix.
    pub fn with_proxy(mut self, prefix: impl Into<String>) -> Self {
        self.proxy = Some(prefix.into());
        self
    }

    /// Disables proxying; requests go straight to the target URL.
    pub fn without_proxy(mut self) -> Self {
        self.proxy = None;
        self
    }

    /// Sets the per-request timeout.
    ///
    /// An elapsed timeout surfaces as [`Error::Cancelled`], exactly like a
    /// fired cancellation token.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the rate limit delay for this client.
    ///
    /// # Parameters
    ///
    /// * `delay_ms` - Minimum delay between requests in milliseconds
    pub fn with_rate_limit(mut self, delay_ms: u64) -> Self {
        self.rate_limiter = RateLimiter::new(delay_ms);
        self
    }

    /// Adds a custom header to all requests made by this client.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use almas::net::ProxyClient;
    ///
    /// let client = ProxyClient::new("almas")
    ///     .with_header("Referer", "https://almasmovie.website/");
    /// ```
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            name.parse::<reqwest::header::HeaderName>(),
            value.parse::<reqwest::header::HeaderValue>(),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Resolves the URL actually requested: proxied when a proxy prefix is
    /// configured, the target itself otherwise.
    fn target(&self, url: &str) -> String {
        match &self.proxy {
            Some(prefix) => format!("{}{}", prefix, urlencoding::encode(url)),
            None => url.to_string(),
        }
    }

    /// Sends a prepared request, racing it against the cancellation token
    /// and the per-request timeout.
    ///
    /// The rate-limit wait happens before the timeout window opens, so slow
    /// pacing never eats into the fetch budget. Cancellation is observed at
    /// both suspension points.
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<Bytes> {
        tokio::select! {
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            _ = self.rate_limiter.wait(&self.source_id) => {}
        }

        let send = async {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(Error::status(status));
            }
            Ok(response.bytes().await?)
        };

        tokio::select! {
            _ = cancel.cancelled() => Err(Error::Cancelled),
            outcome = tokio::time::timeout(self.timeout, send) => match outcome {
                Ok(result) => result,
                // An elapsed timeout aborts the request like a token fire.
                Err(_) => Err(Error::Cancelled),
            },
        }
    }

    /// Performs a GET request and returns the response as a UTF-8 string.
    ///
    /// # Parameters
    ///
    /// * `url` - The target URL (pre-proxy)
    /// * `cancel` - Token that aborts the request when fired
    ///
    /// # Errors
    ///
    /// * [`Error::Cancelled`] - Token fired or timeout elapsed
    /// * [`Error::Status`] - Non-2xx response
    /// * [`Error::Network`] - Transport failure
    /// * [`Error::Parse`] - Response body is not valid UTF-8
    pub async fn get_text(&self, url: &str, cancel: &CancellationToken) -> Result<String> {
        log::debug!("[{}] GET {}", self.source_id, url);
        let request = client().get(self.target(url)).headers(self.headers.clone());
        let bytes = self.execute(request, cancel).await?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::parse(format!("Invalid UTF-8: {}", e)))
    }

    /// Performs a POST request with a URL-encoded form body and returns the
    /// response as a UTF-8 string.
    ///
    /// # Parameters
    ///
    /// * `url` - The target URL (pre-proxy)
    /// * `body` - Pre-encoded `key=value&...` form body
    /// * `cancel` - Token that aborts the request when fired
    ///
    /// # Errors
    ///
    /// Same as [`get_text`](ProxyClient::get_text).
    pub async fn post_form(
        &self,
        url: &str,
        body: impl Into<String>,
        cancel: &CancellationToken,
    ) -> Result<String> {
        log::debug!("[{}] POST {}", self.source_id, url);
        let request = client()
            .post(self.target(url))
            .headers(self.headers.clone())
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body.into());
        let bytes = self.execute(request, cancel).await?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::parse(format!("Invalid UTF-8: {}", e)))
    }
}
