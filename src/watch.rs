//! Link watcher with cancellation-aware state publishing.
//!
//! [`LinkWatcher`] drives a [`LinkSource`] fetch in the background and
//! publishes its progress through a [`tokio::sync::watch`] channel as
//! [`FetchState`] snapshots. Re-watching a new URL supersedes the fetch in
//! flight: the old task is cancelled and can no longer touch the state, so
//! subscribers only ever observe the most recent request.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::source::LinkSource;
use crate::types::DownloadLinks;

/// Snapshot of a fetch in progress.
///
/// Mirrors the three-part loading state UIs render from: the last
/// successfully fetched links, whether a request is in flight, and the
/// message of the last failure. `data` survives reloads, so a refetch shows
/// stale links alongside `loading` instead of a blank screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchState {
    /// Links from the last completed fetch, if any.
    pub data: Option<DownloadLinks>,
    /// Whether a fetch is currently in flight.
    pub loading: bool,
    /// Message of the last failed fetch. Cleared when a new fetch starts.
    pub error: Option<String>,
}

/// Watches a detail-page URL and keeps a [`FetchState`] up to date.
///
/// Dropping the watcher cancels any fetch still in flight.
///
/// # Examples
///
/// ```rust,no_run
/// use almas::prelude::*;
///
/// # async fn run() {
/// let mut watcher = LinkWatcher::new(AlmasSource::new());
/// let mut states = watcher.subscribe();
///
/// watcher.watch("https://almasmovie.website/series/breaking-bad");
///
/// while states.changed().await.is_ok() {
///     let state = states.borrow().clone();
///     if !state.loading {
///         println!("{:?}", state.data);
///         break;
///     }
/// }
/// # }
/// ```
pub struct LinkWatcher {
    source: Arc<dyn LinkSource>,
    state_tx: Arc<watch::Sender<FetchState>>,
    cancel: Option<CancellationToken>,
    url: Option<String>,
}

impl LinkWatcher {
    /// Creates a watcher over the given source. No fetch starts until
    /// [`watch()`](LinkWatcher::watch) is called.
    pub fn new(source: impl LinkSource + 'static) -> Self {
        Self::from_arc(Arc::new(source))
    }

    /// Creates a watcher over an already-shared source.
    pub fn from_arc(source: Arc<dyn LinkSource>) -> Self {
        let (state_tx, _) = watch::channel(FetchState::default());
        Self {
            source,
            state_tx: Arc::new(state_tx),
            cancel: None,
            url: None,
        }
    }

    /// Starts fetching links for `url`, superseding any fetch in flight.
    ///
    /// An empty URL is ignored and leaves the current state untouched.
    pub fn watch(&mut self, url: &str) {
        if url.is_empty() {
            return;
        }
        self.url = Some(url.to_string());
        self.spawn_fetch();
    }

    /// Fetches the current URL again. Existing `data` stays visible while
    /// the reload is in flight. Does nothing before the first
    /// [`watch()`](LinkWatcher::watch).
    pub fn refetch(&mut self) {
        if self.url.is_some() {
            self.spawn_fetch();
        }
    }

    /// Returns a receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state_tx.subscribe()
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> FetchState {
        self.state_tx.borrow().clone()
    }

    /// The URL currently being watched.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn spawn_fetch(&mut self) {
        // Supersede the previous fetch before the new one becomes visible.
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());

        let url = match &self.url {
            Some(url) => url.clone(),
            None => return,
        };

        // Published synchronously so subscribers never observe a started
        // watch without its loading flag.
        self.state_tx.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let source = Arc::clone(&self.source);
        let state_tx = Arc::clone(&self.state_tx);
        tokio::spawn(async move {
            let outcome = source.fetch_links(&url, &token).await;

            if token.is_cancelled() {
                log::debug!("[{}] superseded fetch for {}", source.id(), url);
                return;
            }

            // The token checks inside the closures run under the channel
            // lock, so a fetch superseded mid-commit cannot clobber the
            // state its successor already owns.
            match outcome {
                Ok(links) => {
                    log::debug!("[{}] fetched links for {}", source.id(), url);
                    state_tx.send_if_modified(|state| {
                        if token.is_cancelled() {
                            return false;
                        }
                        state.data = Some(links);
                        state.loading = false;
                        true
                    });
                }
                Err(error) if error.is_cancelled() => {
                    // Timed out with the token still live. Stop loading and
                    // keep whatever data is already there.
                    log::debug!("[{}] fetch timed out for {}", source.id(), url);
                    state_tx.send_if_modified(|state| {
                        if token.is_cancelled() {
                            return false;
                        }
                        state.loading = false;
                        true
                    });
                }
                Err(error) => {
                    log::debug!("[{}] fetch failed for {}: {}", source.id(), url, error);
                    state_tx.send_if_modified(|state| {
                        if token.is_cancelled() {
                            return false;
                        }
                        state.error = Some(error.to_string());
                        state.loading = false;
                        true
                    });
                }
            }
        });
    }
}

impl Drop for LinkWatcher {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
    }
}
