/// Live preview of mention rule results on the dashboard
use log::{debug, error};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::PreviewConfig;
use crate::error::ExtensionError;
use crate::host::{CycleOutcome, PreviewClient, PreviewTarget};

/// Value of one form field: repeated names become a list
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    List(Vec<String>),
}

impl FieldValue {
    fn push(&mut self, value: String) {
        match self {
            FieldValue::List(values) => values.push(value),
            FieldValue::Single(first) => {
                let first = std::mem::take(first);
                *self = FieldValue::List(vec![first, value]);
            }
        }
    }
}

/// The form's current fields, in the order they were first submitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    fields: Vec<(String, FieldValue)>,
}

impl FormPayload {
    /// Collect `(name, value)` pairs as the form submits them.
    /// Names listed in `list_fields` are lists even when they appear once.
    pub fn from_entries<I>(entries: I, list_fields: &[String]) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut payload = FormPayload::default();

        for (name, value) in entries {
            match payload.fields.iter_mut().find(|(n, _)| *n == name) {
                Some((_, existing)) => existing.push(value),
                None => {
                    let field = if list_fields.contains(&name) {
                        FieldValue::List(vec![value])
                    } else {
                        FieldValue::Single(value)
                    };
                    payload.fields.push((name, field));
                }
            }
        }

        payload
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_json(&self) -> Result<String, ExtensionError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for FormPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

pub struct LivePreview<C, T> {
    client: C,
    target: T,
    config: PreviewConfig,
}

impl<C: PreviewClient, T: PreviewTarget> LivePreview<C, T> {
    pub fn new(client: C, target: T, config: PreviewConfig) -> Self {
        LivePreview {
            client,
            target,
            config,
        }
    }

    /// Re-render the preview from the form's current fields
    ///
    /// The loading message is shown before the request goes out. Requests
    /// are not sequenced: when several overlap, whichever resolves last is
    /// what stays on screen.
    pub async fn refresh<I>(&self, entries: I) -> CycleOutcome
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let payload = FormPayload::from_entries(entries, &self.config.list_fields);

        self.target.replace_contents(&self.config.loading_html);

        let result = match payload.to_json() {
            Ok(body) => {
                debug!("Requesting mention preview with {} fields", payload.len());
                self.client.render_preview(&body).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(html) => {
                self.target.replace_contents(&html);
                CycleOutcome::Rendered
            }
            Err(e) => {
                error!("Mention live preview failed: {}", e);
                self.target.replace_contents(&self.config.error_html);
                CycleOutcome::ErrorShown
            }
        }
    }
}
