/// Error type shared by the extension and the preview script
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("browser API call failed: {0}")]
    Host(String),

    #[error("element not found: {0}")]
    MissingElement(String),
}

impl ExtensionError {
    pub fn transport(e: JsValue) -> Self {
        ExtensionError::Transport(describe(&e))
    }

    pub fn host(e: JsValue) -> Self {
        ExtensionError::Host(describe(&e))
    }
}

impl From<ExtensionError> for JsValue {
    fn from(e: ExtensionError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for ExtensionError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        ExtensionError::Host(e.to_string())
    }
}

/// Render a thrown JS value for logs
fn describe(e: &JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}
