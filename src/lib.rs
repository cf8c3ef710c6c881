//! # Almas - Async movie and TV download-link aggregation library
//!
//! Almas is an async library that resolves structured download links for
//! movies and TV series from Almas Movie (almasmovie.website). It drives the
//! site's WordPress AJAX endpoint through a CORS proxy, parses the returned
//! markup into typed link collections, classifies each link's release
//! properties, and keeps UI-ready state up to date through a cancellation-aware
//! watcher.
//!
//! ## Features
//!
//! - **Proxied Scraping**: Fetches detail pages and AJAX fragments through a
//!   configurable CORS proxy
//! - **Typed Link Collections**: Movies yield quality lists, series yield
//!   per-season quality lists
//! - **Release Classification**: Derives quality, source, audio, encoder and
//!   flags from link filenames, with English and Persian labels
//! - **Cancellation-Aware Watching**: Re-watching a URL supersedes the fetch
//!   in flight; stale results never clobber newer state
//! - **Mirror Link Builders**: Deterministic direct-download and subtitle URLs
//!   from IMDb ids
//! - **TMDB Metadata**: Trending listings, title details, images and videos
//!   (requires the `metadata` feature, enabled by default)
//! - **Rate Limiting**: Per-source request spacing to respect website policies
//!
//! ## Quick Start
//!
//! ### Watching a title's links
//!
//! ```rust,no_run
//! use almas::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = AlmasSource::new();
//!     let url = source.series_url("Breaking Bad");
//!
//!     let mut watcher = LinkWatcher::new(source);
//!     let mut states = watcher.subscribe();
//!
//!     watcher.watch(&url);
//!
//!     while states.changed().await.is_ok() {
//!         let state = states.borrow().clone();
//!         if state.loading {
//!             continue;
//!         }
//!         match (state.data, state.error) {
//!             (Some(links), _) => println!("got {:?} links", links.kind()),
//!             (None, Some(message)) => eprintln!("failed: {}", message),
//!             (None, None) => {}
//!         }
//!         break;
//!     }
//! }
//! ```
//!
//! ### One-shot fetching
//!
//! ```rust,no_run
//! use almas::prelude::*;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let source = AlmasSource::new();
//!     let cancel = CancellationToken::new();
//!
//!     let links = source
//!         .fetch_links("https://almasmovie.website/87200/dune-part-two/", &cancel)
//!         .await?;
//!
//!     if let DownloadLinks::Movie(qualities) = links {
//!         for quality in qualities {
//!             println!("{}: {:?}", quality.quality, quality.download_link);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Classifying a release name
//!
//! ```rust
//! use almas::release::classify;
//!
//! let info = classify("Interstellar.2014.1080p.BluRay.x264.YIFY.mkv");
//! assert_eq!(info.quality.en, "1080p");
//! assert_eq!(info.source.en, "BluRay");
//! assert_eq!(info.encoder, "yify");
//! assert!(!info.dubbed);
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`source`]: Core trait for download-link providers
//! - [`sources`]: The shipped Almas Movie implementation
//! - [`extract`]: Markup-to-links extraction strategies
//! - [`release`]: Filename classification with bilingual labels
//! - [`watch`]: Cancellation-aware fetch state publishing
//! - [`mirrors`]: Deterministic mirror and subtitle URL builders
//! - [`tmdb`]: TMDB metadata client (behind the `metadata` feature)
//! - [`net`]: Proxied HTTP client, rate limiting, and parsing utilities
//! - [`types`]: Core data structures for links, qualities, and seasons
//! - [`error`]: Comprehensive error handling

pub mod error;
pub mod extract;
pub mod mirrors;
pub mod net;
pub mod release;
pub mod source;
pub mod sources;
pub mod types;
pub mod watch;

#[cfg(feature = "metadata")]
pub mod tmdb;

/// Prelude module for convenient imports.
///
/// Re-exports the most commonly used types and traits, allowing you to
/// import everything you need with a single `use almas::prelude::*;`
/// statement.
///
/// # Example
///
/// ```rust
/// use almas::prelude::*;
///
/// // Now you have access to:
/// // - AlmasSource, LinkSource trait
/// // - LinkWatcher, FetchState
/// // - DownloadLinks, Quality, Season, ContentKind
/// // - classify, ReleaseInfo, Label
/// ```
pub mod prelude {
    pub use crate::{
        error::{Error, Result},
        release::{classify, Label, ReleaseInfo},
        source::LinkSource,
        sources::AlmasSource,
        types::{ContentKind, DownloadLinks, Quality, Season},
        watch::{FetchState, LinkWatcher},
    };

    #[cfg(feature = "metadata")]
    pub use crate::tmdb::TmdbClient;
}

// Re-export main types at crate root for direct access
pub use error::{Error, Result};
pub use release::{classify, ReleaseInfo};
pub use source::LinkSource;
pub use sources::AlmasSource;
pub use types::{ContentKind, DownloadLinks, Quality, Season};
pub use watch::{FetchState, LinkWatcher};

#[cfg(feature = "metadata")]
pub use tmdb::TmdbClient;
