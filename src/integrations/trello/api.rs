use crate::integrations::{Card, CustomField, TrackerError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TRELLO_API_BASE: &str = "https://api.trello.com/1";

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TrelloCard {
    pub(crate) id: String,
    pub(crate) name: String,
    #[serde(default, rename = "customFieldItems")]
    pub(crate) custom_field_items: Vec<CustomFieldItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CustomFieldItem {
    #[serde(rename = "idCustomField")]
    pub(crate) id_custom_field: String,
    #[serde(default)]
    pub(crate) value: Option<CustomFieldValue>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub(crate) struct CustomFieldValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CustomFieldUpdate {
    pub(crate) value: CustomFieldValue,
}

impl CustomFieldUpdate {
    pub(crate) fn text(text: &str) -> Self {
        Self {
            value: CustomFieldValue {
                text: Some(text.to_string()),
            },
        }
    }
}

impl TrelloCard {
    pub(crate) fn into_card(self, assignee_field_id: &str) -> Card {
        let assignee = self
            .custom_field_items
            .into_iter()
            .find(|item| item.id_custom_field == assignee_field_id)
            .and_then(|item| item.value)
            .and_then(|value| value.text);
        Card {
            id: self.id,
            name: self.name,
            assignee,
        }
    }
}

pub(crate) fn find_field<'a>(fields: &'a [CustomField], name: &str) -> Option<&'a CustomField> {
    fields
        .iter()
        .find(|field| field.name.to_lowercase() == name.to_lowercase())
}

pub(crate) fn endpoint(api_base: &str, path: &str, query: &[(&str, String)]) -> String {
    let url = format!("{}/{}", api_base.trim_end_matches('/'), path);
    if query.is_empty() {
        return url;
    }
    let encoded = query
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{url}?{encoded}")
}

pub(crate) fn check_response(
    result: Result<ureq::Response, ureq::Error>,
) -> Result<ureq::Response, TrackerError> {
    match result {
        Ok(response) => Ok(response),
        Err(ureq::Error::Status(status, response)) => Err(TrackerError::ApiResponse {
            status,
            body: response.into_string().unwrap_or_default(),
        }),
        Err(err) => Err(TrackerError::ApiRequest(err.to_string())),
    }
}
