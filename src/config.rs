/// Runtime configuration, injected into each component at construction
use serde::{Deserialize, Serialize};

/// Root configuration. Every section falls back to its defaults when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub badge: BadgeConfig,
    pub launcher: LauncherConfig,
    pub preview: PreviewConfig,
}

/// Discussion counts API endpoint and credentials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub api_base: String,
    pub api_token: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            api_base: "https://discu.eu/api/v0".to_string(),
            api_token: "browser-extension".to_string(),
        }
    }
}

/// Badge appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    /// Title shown when the badge is cleared
    pub default_title: String,
    pub background_color: String,
    pub text_color: String,
    /// Largest count rendered; anything above is shown as this value
    pub max_count: u64,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        BadgeConfig {
            default_title: "Discussions".to_string(),
            background_color: "#666666".to_string(),
            text_color: "white".to_string(),
            max_count: 999,
        }
    }
}

/// Search page opened by the toolbar action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    pub search_base: String,
    /// Attribution sent as `utm_source`, omitted when `None`
    pub source: Option<String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        LauncherConfig {
            search_base: "https://discu.eu/".to_string(),
            source: Some("browser-extension".to_string()),
        }
    }
}

/// Mention rule live preview on the dashboard page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub endpoint: String,
    pub container_selector: String,
    pub form_selector: String,
    pub trigger_selector: String,
    /// Fields serialized as a list even when they appear once
    pub list_fields: Vec<String>,
    pub loading_html: String,
    pub error_html: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        PreviewConfig {
            endpoint: "/mention_live_preview".to_string(),
            container_selector: "#mention_live_preview".to_string(),
            form_selector: "#dashboard_mentions_form form".to_string(),
            trigger_selector: "#button-id-live-preview-mention-rule".to_string(),
            list_fields: vec!["exclude_platforms".to_string()],
            loading_html: "<p>Looking results up...</p>".to_string(),
            error_html: "<p>Something went wrong, please retry in a few moments...</p>"
                .to_string(),
        }
    }
}
