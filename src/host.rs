//! Seams between the components and the browser
//!
//! The components only talk to these traits. `crate::browser` implements
//! them over the extension and DOM APIs; tests use in-memory fakes.
#![allow(async_fn_in_trait)]

use std::future::Future;
use std::pin::Pin;

use crate::badge::BadgeState;
use crate::error::ExtensionError;
use crate::tab_data::{CreateTabProperties, DiscussionCounts, TabInfo, TabUrlChanged};

/// A unit of work handed to the host's event loop
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// How one event cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The event did not qualify; nothing was requested
    Skipped,
    Rendered,
    Cleared,
    /// The request failed; the UI shows the error state or is left as it was
    ErrorShown,
}

/// Subscription to host events
pub trait HostEvents {
    fn on_tab_url_changed(&self, handler: Box<dyn Fn(TabUrlChanged)>);

    fn on_action_invoked(&self, handler: Box<dyn Fn()>);
}

pub trait TabHost {
    /// Active tab(s) of the current window
    async fn active_tabs(&self) -> Result<Vec<TabInfo>, ExtensionError>;

    async fn create_tab(&self, properties: &CreateTabProperties) -> Result<(), ExtensionError>;
}

pub trait BadgeSink {
    async fn apply_badge(&self, tab_id: i32, badge: &BadgeState) -> Result<(), ExtensionError>;
}

pub trait CountsClient {
    /// `Ok(None)` means the server answered with an empty body
    async fn discussion_counts(
        &self,
        url: &str,
    ) -> Result<Option<DiscussionCounts>, ExtensionError>;
}

pub trait PreviewClient {
    /// POST the JSON payload, returning the HTML fragment
    async fn render_preview(&self, body: &str) -> Result<String, ExtensionError>;
}

/// The element whose contents the preview replaces
pub trait PreviewTarget {
    fn replace_contents(&self, html: &str);
}
