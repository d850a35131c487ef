/// HTTP clients over the global `fetch`, usable from both the service
/// worker and a page
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCache, RequestCredentials, RequestInit, Response};

use crate::config::ApiConfig;
use crate::error::ExtensionError;
use crate::host::{CountsClient, PreviewClient};
use crate::launcher::encode_component;
use crate::sync::decode_counts;
use crate::tab_data::DiscussionCounts;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_name = fetch)]
    async fn fetch_request(request: &Request) -> Result<JsValue, JsValue>;
}

/// Send a request and read the body as text
async fn fetch_text(request: &Request) -> Result<String, ExtensionError> {
    let response: Response = fetch_request(request)
        .await
        .map_err(ExtensionError::transport)?
        .dyn_into()
        .map_err(ExtensionError::transport)?;

    response_text(response).await
}

/// Non-2xx statuses are errors
async fn response_text(response: Response) -> Result<String, ExtensionError> {
    if !response.ok() {
        return Err(ExtensionError::Status(response.status()));
    }

    let text = JsFuture::from(response.text().map_err(ExtensionError::transport)?)
        .await
        .map_err(ExtensionError::transport)?;

    Ok(text.as_string().unwrap_or_default())
}

pub fn counts_url(api_base: &str, page_url: &str) -> String {
    format!(
        "{}/discussion_counts/url/{}",
        api_base.trim_end_matches('/'),
        encode_component(page_url)
    )
}

/// `GET {api_base}/discussion_counts/url/{url}`
pub struct CountsApi {
    config: ApiConfig,
}

impl CountsApi {
    pub fn new(config: ApiConfig) -> Self {
        CountsApi { config }
    }

    fn request(&self, page_url: &str) -> Result<Request, ExtensionError> {
        let headers = Headers::new().map_err(ExtensionError::host)?;
        headers
            .set("Accept", "application/json")
            .map_err(ExtensionError::host)?;
        headers
            .set("Authorization", &format!("Bearer {}", self.config.api_token))
            .map_err(ExtensionError::host)?;

        let init = RequestInit::new();
        init.set_method("GET");
        init.set_headers(&headers);

        Request::new_with_str_and_init(&counts_url(&self.config.api_base, page_url), &init)
            .map_err(ExtensionError::host)
    }
}

impl CountsClient for CountsApi {
    async fn discussion_counts(
        &self,
        url: &str,
    ) -> Result<Option<DiscussionCounts>, ExtensionError> {
        let request = self.request(url)?;
        let body = fetch_text(&request).await?;
        decode_counts(&body)
    }
}

/// `POST` to the preview endpoint with the page's credentials, uncached
pub struct PreviewApi {
    endpoint: String,
}

impl PreviewApi {
    pub fn new(endpoint: &str) -> Self {
        PreviewApi {
            endpoint: endpoint.to_string(),
        }
    }

    fn request(&self, body: &str) -> Result<Request, ExtensionError> {
        let headers = Headers::new().map_err(ExtensionError::host)?;
        headers
            .set("Content-Type", "application/json")
            .map_err(ExtensionError::host)?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(body));
        init.set_credentials(RequestCredentials::SameOrigin);
        init.set_cache(RequestCache::NoCache);

        Request::new_with_str_and_init(&self.endpoint, &init).map_err(ExtensionError::host)
    }
}

impl PreviewClient for PreviewApi {
    async fn render_preview(&self, body: &str) -> Result<String, ExtensionError> {
        let request = self.request(body)?;
        fetch_text(&request).await
    }
}
