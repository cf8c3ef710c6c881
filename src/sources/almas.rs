use crate::{
    error::{Error, Result},
    extract,
    net::{self, ProxyClient},
    source::LinkSource,
    types::{ContentKind, DownloadLinks},
};
use async_trait::async_trait;
use derive_builder::Builder;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Production site root.
const BASE_URL: &str = "https://almasmovie.website";

/// WordPress AJAX endpoint serving the download-link fragments.
const AJAX_URL: &str = "https://almasmovie.website/wp-admin/admin-ajax.php";

/// AJAX action that returns the download links for a post.
const AJAX_ACTION: &str = "getPostLinksAjax";

static LINK_TAG: Lazy<Selector> =
    Lazy::new(|| Selector::parse("link").expect("valid link selector"));

/// First digit run that terminates a path segment, e.g. the `87200` in
/// `https://almasmovie.website/87200/dune-part-two/`.
static ID_IN_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/([0-9]+)(?:[/?#]|$)").expect("valid id pattern"));

/// Connection settings for [`AlmasSource`].
///
/// Defaults target the production site through the public CORS proxy. Use
/// [`SourceOptionsBuilder`] to point at a mirror or tune timings:
///
/// ```rust
/// use almas::sources::almas::SourceOptionsBuilder;
///
/// let options = SourceOptionsBuilder::default()
///     .timeout_ms(5_000u64)
///     .proxy(None)
///     .build()
///     .unwrap();
/// assert_eq!(options.base_url, "https://almasmovie.website");
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), default)]
pub struct SourceOptions {
    /// Site root, without a trailing slash.
    pub base_url: String,
    /// Endpoint receiving the `getPostLinksAjax` form POST.
    pub ajax_url: String,
    /// Proxy prefix applied to every request, `None` for direct access.
    pub proxy: Option<String>,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Minimum delay between requests in milliseconds.
    pub rate_limit_ms: u64,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            ajax_url: AJAX_URL.to_string(),
            proxy: Some(net::DEFAULT_PROXY.to_string()),
            timeout_ms: net::DEFAULT_TIMEOUT.as_millis() as u64,
            rate_limit_ms: 200,
        }
    }
}

/// Resolved POST parameters for a detail page.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PostTarget {
    pub id: String,
    pub kind: ContentKind,
}

/// Pulls the post id and content kind out of a detail page.
///
/// Detail pages carry a `<link rel="alternate" type="application/json"
/// title="json">` tag whose href embeds the WordPress post id. Attribute
/// values are matched case-insensitively since the site is not consistent
/// about casing.
pub(crate) fn resolve_target(html: &str) -> Result<PostTarget> {
    let document = net::html::parse(html);

    let alternate = document
        .select(&LINK_TAG)
        .find(|link| {
            net::html::attr_eq_ignore_case(link, "rel", "alternate")
                && net::html::attr_eq_ignore_case(link, "type", "application/json")
                && net::html::attr_eq_ignore_case(link, "title", "json")
        })
        .and_then(|link| net::html::element_attr(&link, "href"))
        .ok_or_else(|| Error::parse("could not extract JSON info from page"))?;

    let id = ID_IN_HREF
        .captures(alternate)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| Error::parse("no id found in alternate link"))?;

    let kind = if alternate.contains("/series/") {
        ContentKind::Series
    } else {
        ContentKind::Movie
    };

    Ok(PostTarget { id, kind })
}

/// Lowercases a title and joins its alphanumeric runs with hyphens,
/// matching the site's permalink scheme.
pub(crate) fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Link source for Almas Movie (almasmovie.website).
///
/// Fetches a title's detail page through a CORS proxy, resolves the
/// WordPress post id behind it, then POSTs to the site's AJAX endpoint
/// and parses the returned fragment into [`DownloadLinks`].
///
/// # Examples
///
/// ```rust,no_run
/// use almas::prelude::*;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn run() -> Result<()> {
/// let source = AlmasSource::new();
/// let url = source.series_url("Breaking Bad");
/// let links = source.fetch_links(&url, &CancellationToken::new()).await?;
/// println!("{} link groups", links.kind().as_str());
/// # Ok(())
/// # }
/// ```
pub struct AlmasSource {
    options: SourceOptions,
    client: ProxyClient,
}

impl AlmasSource {
    /// Creates a source with the default production options.
    pub fn new() -> Self {
        Self::with_options(SourceOptions::default())
    }

    /// Creates a source with custom connection settings.
    pub fn with_options(options: SourceOptions) -> Self {
        let mut client = ProxyClient::new("almas")
            .with_timeout(Duration::from_millis(options.timeout_ms))
            .with_rate_limit(options.rate_limit_ms);

        client = match &options.proxy {
            Some(prefix) => client.with_proxy(prefix.clone()),
            None => client.without_proxy(),
        };

        Self { options, client }
    }

    /// Builds the detail-page URL for a series from its display name.
    pub fn series_url(&self, name: &str) -> String {
        format!(
            "{}/series/{}",
            self.options.base_url.trim_end_matches('/'),
            slugify(name)
        )
    }

    /// Format the AJAX form body for a post
    fn form_body(id: &str, kind: ContentKind) -> String {
        let params = [
            ("action", AJAX_ACTION),
            ("id", id),
            ("posttype", kind.posttype()),
        ];

        params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl Default for AlmasSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkSource for AlmasSource {
    fn id(&self) -> &'static str {
        "almas"
    }

    fn name(&self) -> &'static str {
        "Almas Movie"
    }

    fn base_url(&self) -> &str {
        &self.options.base_url
    }

    async fn fetch_links(
        &self,
        detail_url: &str,
        cancel: &CancellationToken,
    ) -> Result<DownloadLinks> {
        let page = self.client.get_text(detail_url, cancel).await?;
        if page.trim().is_empty() {
            return Err(Error::source(self.id(), "empty response for detail page"));
        }

        let target = resolve_target(&page)?;
        log::debug!(
            "[{}] resolved post id {} ({})",
            self.id(),
            target.id,
            target.kind.as_str()
        );

        let body = Self::form_body(&target.id, target.kind);
        let fragment = self
            .client
            .post_form(&self.options.ajax_url, body, cancel)
            .await?;
        if fragment.trim().is_empty() {
            return Err(Error::source(self.id(), "empty download fragment"));
        }

        let links = match target.kind {
            ContentKind::Movie => DownloadLinks::Movie(extract::movie::extract(&fragment)),
            ContentKind::Series => DownloadLinks::Series(extract::series::extract(&fragment)),
        };

        Ok(links)
    }
}
