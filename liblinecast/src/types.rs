//! Core types for Linecast

use serde::{Deserialize, Deserializer, Serialize};

/// One candidate post from the content file
///
/// Every field is optional. Unknown keys are ignored so content files can
/// carry notes for editors, and a known key holding anything other than a
/// string reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    /// Calendar day this record is pinned to, `YYYY-MM-DD`
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

impl PostRecord {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Whether the record carries anything that can be sent
    pub fn is_postable(&self) -> bool {
        self.text.is_some() || self.image_url.is_some()
    }
}

/// A LINE message object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Text {
        text: String,
    },
    Image {
        #[serde(rename = "originalContentUrl")]
        original_content_url: String,
        #[serde(rename = "previewImageUrl")]
        preview_image_url: String,
    },
}

/// Body of `POST /v2/bot/message/broadcast`
#[derive(Debug, Clone, Serialize)]
pub struct BroadcastRequest<'a> {
    pub messages: &'a [Message],
}

/// What the broadcast endpoint answered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BroadcastResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl BroadcastResponse {
    /// Build from a raw response body
    ///
    /// An empty or non-JSON body is represented as `{"status": <code>}`.
    pub fn from_body(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            serde_json::json!({ "status": status })
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| serde_json::json!({ "status": status }))
        };
        Self { status, body }
    }
}
