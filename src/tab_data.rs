/// Data structures exchanged with the browser and the counts API
use serde::{Deserialize, Serialize};

/// Information about a browser tab, as returned by `chrome.tabs.query`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabInfo {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub index: i32,
}

impl TabInfo {
    pub fn new(id: i32, url: String, title: String, index: i32) -> TabInfo {
        TabInfo {
            id,
            url,
            title,
            index,
        }
    }
}

/// A tab navigated somewhere; `url` is only set when the URL itself changed
#[derive(Debug, Clone, PartialEq)]
pub struct TabUrlChanged {
    pub tab_id: i32,
    pub url: Option<String>,
}

/// The `changeInfo` argument of `chrome.tabs.onUpdated`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TabChangeInfo {
    #[serde(default)]
    pub url: Option<String>,
}

/// Properties for `chrome.tabs.create`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTabProperties {
    pub active: bool,
    pub url: String,
    pub index: i32,
}

/// Totals reported by `/discussion_counts/url/{url}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscussionCounts {
    pub total_discussions: u64,
    pub total_comments: u64,
    pub articles_count: u64,
}

impl DiscussionCounts {
    /// Nothing has been posted about the page
    pub fn is_empty(&self) -> bool {
        self.total_discussions == 0 && self.articles_count == 0
    }

    pub fn activity(&self) -> u64 {
        self.total_comments.saturating_add(self.articles_count)
    }
}
