//! Type-ahead presenter

use std::sync::Arc;
use std::time::Duration;

use futures::Stream;
use tokio::sync::{RwLock, watch};
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

use crate::broker::CountryBroker;
use crate::throttle::{InputThrottler, RunHandle};
use crate::types::Country;

/// Presenter for a type-ahead search box.
///
/// Holds the latest search text and a throttled refresh action that asks the
/// broker for the matching countries. Because the action reads the text at
/// run time, a coalesced refresh always serves the most recent keystroke.
/// Results are published through a watch channel, so a view can await
/// changes, poll a snapshot, or consume them as a stream.
pub struct TypeAheadPresenter {
    search: Arc<RwLock<String>>,
    throttler: InputThrottler,
    matches: watch::Receiver<Arc<Vec<Country>>>,
}

impl TypeAheadPresenter {
    /// Create a presenter over `broker` with the given refresh backoff
    /// (floor-adjusted, see [`InputThrottler::BACKOFF_FLOOR`]).
    pub fn new(broker: Arc<dyn CountryBroker>, backoff: Duration) -> Self {
        let search = Arc::new(RwLock::new(String::new()));
        let (matches_tx, matches_rx) = watch::channel(Arc::new(Vec::new()));
        let matches_tx = Arc::new(matches_tx);

        let action_search = Arc::clone(&search);
        let throttler = InputThrottler::new(
            move || {
                let broker = Arc::clone(&broker);
                let search = Arc::clone(&action_search);
                let matches_tx = Arc::clone(&matches_tx);
                async move {
                    let text = search.read().await.clone();
                    let list = broker.filtered_countries(Some(&text), None).await?;
                    debug!("type-ahead refresh for {:?}: {} matches", text, list.len());
                    let _ = matches_tx.send(Arc::new(list));
                    Ok(())
                }
            },
            backoff,
        );

        Self { search, throttler, matches: matches_rx }
    }

    /// Record a keystroke and queue a throttled refresh.
    ///
    /// The returned handle resolves `Ok(true)` if this keystroke's refresh
    /// ran, `Ok(false)` if a later keystroke superseded it. Views that only
    /// watch [`Self::matches`] may drop the handle.
    pub async fn set_search(&self, text: impl Into<String>) -> RunHandle {
        *self.search.write().await = text.into();
        self.throttler.enqueue()
    }

    /// The current search text.
    pub async fn search_text(&self) -> String {
        self.search.read().await.clone()
    }

    /// Watch receiver for the filtered country list.
    pub fn matches(&self) -> watch::Receiver<Arc<Vec<Country>>> {
        self.matches.clone()
    }

    /// The filtered country list as a stream of updates.
    pub fn match_stream(&self) -> impl Stream<Item = Arc<Vec<Country>>> + 'static {
        WatchStream::new(self.matches.clone())
    }

    /// Snapshot of the current filtered country list.
    pub fn current_matches(&self) -> Arc<Vec<Country>> {
        self.matches.borrow().clone()
    }

    /// Snapshot of the current match names, for plain-string suggestion
    /// lists.
    pub fn suggestions(&self) -> Vec<String> {
        self.current_matches().iter().map(|country| country.name.clone()).collect()
    }
}
