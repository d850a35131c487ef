/// Opens the discussions search for the current page in a new tab
use log::{error, info};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::config::LauncherConfig;
use crate::host::{CycleOutcome, TabHost};
use crate::tab_data::{CreateTabProperties, TabInfo};

/// Everything `encodeURIComponent` escapes
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Search page URL for a tab
pub fn discussions_url(tab: &TabInfo, config: &LauncherConfig) -> String {
    let mut url = format!(
        "{}?q={}&submit_title={}",
        config.search_base,
        encode_component(&tab.url),
        encode_component(&tab.title)
    );

    if let Some(source) = &config.source {
        url.push_str("&utm_source=");
        url.push_str(&encode_component(source));
    }

    url
}

/// The new tab opens active, right after the tab it was launched from
pub fn discussions_tab(tab: &TabInfo, config: &LauncherConfig) -> CreateTabProperties {
    CreateTabProperties {
        active: true,
        url: discussions_url(tab, config),
        index: tab.index + 1,
    }
}

pub struct DiscussionLauncher<H> {
    host: H,
    config: LauncherConfig,
}

impl<H: TabHost> DiscussionLauncher<H> {
    pub fn new(host: H, config: LauncherConfig) -> Self {
        DiscussionLauncher { host, config }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Handle a click on the toolbar action. Returns the number of tabs opened.
    pub async fn on_action_invoked(&self) -> (CycleOutcome, usize) {
        let tabs = match self.host.active_tabs().await {
            Ok(tabs) => tabs,
            Err(e) => {
                error!("Failed to query active tabs: {}", e);
                return (CycleOutcome::ErrorShown, 0);
            }
        };

        let mut opened = 0;
        let mut failed = false;

        for tab in &tabs {
            let properties = discussions_tab(tab, &self.config);
            match self.host.create_tab(&properties).await {
                Ok(()) => {
                    info!("Opened {} for tab {}", properties.url, tab.id);
                    opened += 1;
                }
                Err(e) => {
                    error!("Failed to open discussions for tab {}: {}", tab.id, e);
                    failed = true;
                }
            }
        }

        let outcome = if failed {
            CycleOutcome::ErrorShown
        } else if opened == 0 {
            CycleOutcome::Skipped
        } else {
            CycleOutcome::Rendered
        };

        (outcome, opened)
    }
}
