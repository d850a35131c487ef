/// Keeps each tab's badge in line with the discussion counts of its URL
use std::cell::RefCell;
use std::collections::HashMap;

use log::{debug, error};

use crate::badge::BadgeState;
use crate::config::BadgeConfig;
use crate::error::ExtensionError;
use crate::host::{BadgeSink, CountsClient, CycleOutcome};
use crate::tab_data::{DiscussionCounts, TabUrlChanged};

pub struct BadgeSynchronizer<C, B> {
    client: C,
    sink: B,
    config: BadgeConfig,
    /// Last URL seen per tab; replies for any other URL are stale
    latest_urls: RefCell<HashMap<i32, String>>,
}

impl<C: CountsClient, B: BadgeSink> BadgeSynchronizer<C, B> {
    pub fn new(client: C, sink: B, config: BadgeConfig) -> Self {
        BadgeSynchronizer {
            client,
            sink,
            config,
            latest_urls: RefCell::default(),
        }
    }

    pub fn sink(&self) -> &B {
        &self.sink
    }

    /// Handle one `tabs.onUpdated` notification
    ///
    /// Only the tab named by the event is touched. A failed lookup is logged
    /// and leaves the badge as it was. A reply that arrives after the tab
    /// has moved on to another URL is dropped.
    pub async fn on_tab_url_changed(&self, event: TabUrlChanged) -> CycleOutcome {
        let url = match event.url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => return CycleOutcome::Skipped,
        };

        self.latest_urls
            .borrow_mut()
            .insert(event.tab_id, url.to_string());

        debug!("Fetching discussion counts for tab {}: {}", event.tab_id, url);

        let result = self.client.discussion_counts(url).await;

        if !self.is_latest(event.tab_id, url) {
            debug!("Tab {} left {} before its counts arrived", event.tab_id, url);
            return CycleOutcome::Skipped;
        }

        let counts = match result {
            Ok(counts) => counts,
            Err(e) => {
                error!("Discussion counts for tab {} failed: {}", event.tab_id, e);
                return CycleOutcome::ErrorShown;
            }
        };

        debug!("Tab {} counts: {:?}", event.tab_id, counts);

        let badge = BadgeState::from_counts(counts.as_ref(), &self.config);
        if let Err(e) = self.sink.apply_badge(event.tab_id, &badge).await {
            error!("Failed to update badge of tab {}: {}", event.tab_id, e);
            return CycleOutcome::ErrorShown;
        }

        if badge.is_cleared() {
            CycleOutcome::Cleared
        } else {
            CycleOutcome::Rendered
        }
    }

    fn is_latest(&self, tab_id: i32, url: &str) -> bool {
        self.latest_urls.borrow().get(&tab_id).map(String::as_str) == Some(url)
    }
}

/// Decode a counts response body. Blank bodies and `null` mean "no data".
pub fn decode_counts(body: &str) -> Result<Option<DiscussionCounts>, ExtensionError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    Ok(serde_json::from_str::<Option<DiscussionCounts>>(body)?)
}
