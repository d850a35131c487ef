/// `chrome.tabs` and `chrome.action` bindings for the service worker
use log::error;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::badge::BadgeState;
use crate::error::ExtensionError;
use crate::host::{BadgeSink, HostEvents, TabHost};
use crate::tab_data::{CreateTabProperties, TabChangeInfo, TabInfo, TabUrlChanged};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = query)]
    async fn tabs_query(query_info: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = create)]
    async fn tabs_create(create_properties: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "tabs", "onUpdated"], js_name = addListener)]
    fn add_tab_updated_listener(callback: &js_sys::Function);

    #[wasm_bindgen(js_namespace = ["chrome", "action", "onClicked"], js_name = addListener)]
    fn add_action_clicked_listener(callback: &js_sys::Function);

    #[wasm_bindgen(catch, js_namespace = ["chrome", "action"], js_name = setBadgeText)]
    async fn set_badge_text(details: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "action"], js_name = setTitle)]
    async fn set_title(details: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "action"], js_name = setBadgeBackgroundColor)]
    async fn set_badge_background_color(details: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "action"], js_name = setBadgeTextColor)]
    async fn set_badge_text_color(details: JsValue) -> Result<JsValue, JsValue>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActiveTabQuery {
    current_window: bool,
    active: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BadgeText<'a> {
    text: &'a str,
    tab_id: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BadgeTitle<'a> {
    title: &'a str,
    tab_id: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BadgeColor<'a> {
    color: &'a str,
    tab_id: i32,
}

/// `chrome.tabs`
pub struct ChromeTabs;

impl TabHost for ChromeTabs {
    async fn active_tabs(&self) -> Result<Vec<TabInfo>, ExtensionError> {
        let query = serde_wasm_bindgen::to_value(&ActiveTabQuery {
            current_window: true,
            active: true,
        })?;

        let tabs_js = tabs_query(query).await.map_err(ExtensionError::host)?;
        Ok(serde_wasm_bindgen::from_value(tabs_js)?)
    }

    async fn create_tab(&self, properties: &CreateTabProperties) -> Result<(), ExtensionError> {
        let properties = serde_wasm_bindgen::to_value(properties)?;
        tabs_create(properties).await.map_err(ExtensionError::host)?;
        Ok(())
    }
}

/// `chrome.action` badge of the toolbar icon
pub struct ChromeAction;

impl BadgeSink for ChromeAction {
    async fn apply_badge(&self, tab_id: i32, badge: &BadgeState) -> Result<(), ExtensionError> {
        set_badge_text(serde_wasm_bindgen::to_value(&BadgeText {
            text: &badge.text,
            tab_id,
        })?)
        .await
        .map_err(ExtensionError::host)?;

        set_title(serde_wasm_bindgen::to_value(&BadgeTitle {
            title: &badge.title,
            tab_id,
        })?)
        .await
        .map_err(ExtensionError::host)?;

        if let Some(color) = &badge.background_color {
            let details = serde_wasm_bindgen::to_value(&BadgeColor { color, tab_id })?;
            set_badge_background_color(details)
                .await
                .map_err(ExtensionError::host)?;
        }

        if let Some(color) = &badge.text_color {
            set_badge_text_color(serde_wasm_bindgen::to_value(&BadgeColor { color, tab_id })?)
                .await
                .map_err(ExtensionError::host)?;
        }

        Ok(())
    }
}

/// `chrome.tabs.onUpdated` and `chrome.action.onClicked`
///
/// Listeners stay registered for the lifetime of the service worker.
pub struct ChromeEvents;

impl HostEvents for ChromeEvents {
    fn on_tab_url_changed(&self, handler: Box<dyn Fn(TabUrlChanged)>) {
        let on_updated = move |tab_id: JsValue, change_info: JsValue, _tab: JsValue| {
            let Some(tab_id) = tab_id.as_f64() else {
                error!("tabs.onUpdated without a tab id");
                return;
            };

            match serde_wasm_bindgen::from_value::<TabChangeInfo>(change_info) {
                Ok(change) => handler(TabUrlChanged {
                    tab_id: tab_id as i32,
                    url: change.url,
                }),
                Err(e) => error!("Unreadable tabs.onUpdated change info: {}", e),
            }
        };
        let callback =
            Closure::wrap(Box::new(on_updated) as Box<dyn Fn(JsValue, JsValue, JsValue)>);

        add_tab_updated_listener(callback.as_ref().unchecked_ref());
        callback.forget();
    }

    fn on_action_invoked(&self, handler: Box<dyn Fn()>) {
        let callback = Closure::wrap(Box::new(move |_tab: JsValue| {
            handler();
        }) as Box<dyn Fn(JsValue)>);

        add_action_clicked_listener(callback.as_ref().unchecked_ref());
        callback.forget();
    }
}
