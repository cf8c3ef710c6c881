//! Client for The Movie Database (TMDB) v3 API.
//!
//! Supplies the metadata half of the crate: trending listings, per-title
//! details, and image/video collections. The client
//! shares the global HTTP connection pool with the scraping side but talks
//! to the API directly, without a proxy.
//!
//! Requires the `metadata` feature (enabled by default).
//!
//! # Examples
//!
//! ```rust,no_run
//! use almas::tmdb::{Language, TmdbClient};
//!
//! # async fn example() -> almas::Result<()> {
//! let client = TmdbClient::new("YOUR_API_KEY").with_language(Language::En);
//!
//! let trending = client.trending_movies().await?;
//! for movie in &trending.results {
//!     println!("{} ({:.1})", movie.title, movie.vote_average);
//! }
//! # Ok(())
//! # }
//! ```

pub mod types;

use std::time::Duration;

use url::Url;

use crate::{
    error::{Error, Result},
    net,
};

pub use types::*;

/// Production API root.
const API_BASE: &str = "https://api.themoviedb.org/3";

/// Host serving the actual image files.
const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Interface language for API responses.
///
/// Persian is the default; images and videos are always requested in
/// English since TMDB rarely carries localized media for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Fa,
    En,
}

impl Language {
    /// The ISO 639-1 code sent as the `language` query parameter.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Fa => "fa",
            Language::En => "en",
        }
    }
}

/// Width preset for [`image_url`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    W500,
    W780,
    W1280,
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W500 => "w500",
            ImageSize::W780 => "w780",
            ImageSize::W1280 => "w1280",
            ImageSize::Original => "original",
        }
    }
}

/// Builds the full URL for an image path returned by the API.
///
/// `path` is used as returned by the API, with its leading slash. Missing
/// and empty paths yield `None` so callers can pick their own placeholder.
///
/// # Examples
///
/// ```rust
/// use almas::tmdb::{image_url, ImageSize};
///
/// assert_eq!(
///     image_url(Some("/8b8R8l88Qje9dn9OE8PY05Nxl1X.jpg"), ImageSize::W500).as_deref(),
///     Some("https://image.tmdb.org/t/p/w500/8b8R8l88Qje9dn9OE8PY05Nxl1X.jpg")
/// );
/// assert_eq!(image_url(None, ImageSize::W500), None);
/// ```
pub fn image_url(path: Option<&str>, size: ImageSize) -> Option<String> {
    path.filter(|path| !path.is_empty())
        .map(|path| format!("{}/{}{}", IMAGE_BASE, size.as_str(), path))
}

/// Client for the TMDB v3 API.
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    language: Language,
    timeout: Duration,
}

impl TmdbClient {
    /// Creates a client for the production API with Persian responses.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: API_BASE.to_string(),
            language: Language::default(),
            timeout: net::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the interface language for detail and listing responses.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Points the client at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// This week's trending movies.
    pub async fn trending_movies(&self) -> Result<Page<Movie>> {
        let url = self.endpoint("trending/movie/week", self.language)?;
        self.get_json(url).await
    }

    /// This week's trending TV shows.
    pub async fn trending_tv(&self) -> Result<Page<TvShow>> {
        let url = self.endpoint("trending/tv/week", self.language)?;
        self.get_json(url).await
    }

    /// Full movie record. The IMDb id is part of the record itself;
    /// images and videos come from the media endpoints.
    pub async fn movie_details(&self, id: u64) -> Result<MovieDetails> {
        let url = self.endpoint(&format!("movie/{}", id), self.language)?;
        self.get_json(url).await
    }

    /// Full TV record, with external ids and videos appended.
    pub async fn tv_details(&self, id: u64) -> Result<TvDetails> {
        let mut url = self.endpoint(&format!("tv/{}", id), self.language)?;
        url.query_pairs_mut()
            .append_pair("append_to_response", "external_ids,videos,backdrop_path");
        self.get_json(url).await
    }

    /// Backdrops, posters and logos for a movie. Always fetched in
    /// English.
    pub async fn movie_images(&self, id: u64) -> Result<ImageCollection> {
        let url = self.endpoint(&format!("movie/{}/images", id), Language::En)?;
        self.get_json(url).await
    }

    /// Trailers and clips for a movie. Always fetched in English.
    pub async fn movie_videos(&self, id: u64) -> Result<VideoCollection> {
        let url = self.endpoint(&format!("movie/{}/videos", id), Language::En)?;
        self.get_json(url).await
    }

    /// Images and videos for a movie, fetched concurrently.
    pub async fn movie_media(&self, id: u64) -> Result<(ImageCollection, VideoCollection)> {
        futures::try_join!(self.movie_images(id), self.movie_videos(id))
    }

    fn endpoint(&self, path: &str, language: Language) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path
        ))?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("language", language.code());
        Ok(url)
    }

    async fn get_json<T>(&self, url: Url) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        // The query string carries the API key, log the path only.
        log::debug!("[tmdb] GET {}", url.path());

        let response = net::client()
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::status(status));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }
}
