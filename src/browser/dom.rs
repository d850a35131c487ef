/// DOM side of the mention live preview
use std::rc::Rc;

use log::{debug, error};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, FormData, HtmlFormElement};

use crate::browser::http::PreviewApi;
use crate::config::PreviewConfig;
use crate::error::ExtensionError;
use crate::host::PreviewTarget;
use crate::preview::LivePreview;

/// Element whose inner HTML holds the preview
pub struct ElementTarget {
    element: Element,
}

impl ElementTarget {
    pub fn new(element: Element) -> Self {
        ElementTarget { element }
    }
}

impl PreviewTarget for ElementTarget {
    fn replace_contents(&self, html: &str) {
        self.element.set_inner_html(html);
    }
}

fn document() -> Result<Document, ExtensionError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ExtensionError::MissingElement("document".to_string()))
}

fn query(document: &Document, selector: &str) -> Result<Option<Element>, ExtensionError> {
    document.query_selector(selector).map_err(ExtensionError::host)
}

/// String entries of a form, in submission order. File inputs are skipped.
pub fn form_entries(form: &HtmlFormElement) -> Result<Vec<(String, String)>, ExtensionError> {
    let data = FormData::new_with_form(form).map_err(ExtensionError::host)?;
    let iter = js_sys::try_iter(&data)
        .map_err(ExtensionError::host)?
        .ok_or_else(|| ExtensionError::Host("FormData is not iterable".to_string()))?;

    let mut entries = Vec::new();
    for entry in iter {
        let pair: js_sys::Array = entry.map_err(ExtensionError::host)?.unchecked_into();
        if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            entries.push((name, value));
        }
    }

    Ok(entries)
}

fn read_form(selector: &str) -> Result<Vec<(String, String)>, ExtensionError> {
    let form: HtmlFormElement = query(&document()?, selector)?
        .ok_or_else(|| ExtensionError::MissingElement(selector.to_string()))?
        .dyn_into()
        .map_err(|_| ExtensionError::MissingElement(format!("{} (not a form)", selector)))?;
    form_entries(&form)
}

/// Hook the preview up to the dashboard's trigger button
///
/// Returns `false` when the page has no preview container or trigger.
pub fn install_live_preview(config: PreviewConfig) -> Result<bool, ExtensionError> {
    let document = document()?;

    let Some(container) = query(&document, &config.container_selector)? else {
        debug!("No live preview container on this page");
        return Ok(false);
    };
    let Some(trigger) = query(&document, &config.trigger_selector)? else {
        debug!("No live preview trigger on this page");
        return Ok(false);
    };

    let form_selector = config.form_selector.clone();
    let preview = Rc::new(LivePreview::new(
        PreviewApi::new(&config.endpoint),
        ElementTarget::new(container),
        config,
    ));

    let callback = Closure::wrap(Box::new(move |_event: Event| {
        let entries = match read_form(&form_selector) {
            Ok(entries) => entries,
            Err(e) => {
                error!("Cannot read mention form: {}", e);
                return;
            }
        };

        let preview = preview.clone();
        spawn_local(async move {
            preview.refresh(entries).await;
        });
    }) as Box<dyn Fn(Event)>);

    trigger
        .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
        .map_err(ExtensionError::host)?;
    callback.forget();

    Ok(true)
}

/// Install now, or once the document has been parsed
pub fn install_when_ready(config: PreviewConfig) -> Result<(), ExtensionError> {
    let document = document()?;

    if document.ready_state() != "loading" {
        install_live_preview(config)?;
        return Ok(());
    }

    let on_ready = Closure::once(move |_event: Event| {
        if let Err(e) = install_live_preview(config) {
            error!("Failed to install mention live preview: {}", e);
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
        .map_err(ExtensionError::host)?;
    on_ready.forget();

    Ok(())
}
