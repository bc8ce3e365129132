//! Push payload types.

use serde_json::{Map, Value};

use crate::LaunchUrl;

/// Payload key holding the string-encoded custom mapping.
pub const CUSTOM_KEY: &str = "custom";
/// Custom mapping key holding the launch URL.
pub const LAUNCH_URL_KEY: &str = "u";
/// Custom mapping key holding the notification ID.
pub const NOTIFICATION_ID_KEY: &str = "i";
/// Custom mapping key holding the additional data object.
pub const ADDITIONAL_DATA_KEY: &str = "a";
/// Additional data key marking an in-app message preview push.
pub const IN_APP_PREVIEW_KEY: &str = "os_in_app_message_preview_id";

/// Error decoding the `custom` field of a payload.
#[derive(Debug, thiserror::Error)]
pub enum CustomDataError {
    /// The field is a string but not a JSON object.
    #[error("custom field is not a JSON object: {0}")]
    Json(#[from] serde_json::Error),
    /// The field is neither a string nor an object.
    #[error("custom field has unsupported type {0}")]
    UnsupportedType(&'static str),
}

/// Untyped key/value payload delivered by the push transport.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PushPayload(Map<String, Value>);

impl PushPayload {
    /// Wrap a raw payload mapping.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Parse a payload from a JSON object string.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Decode the `custom` field.
    ///
    /// Absent or malformed fields decode to an empty mapping; a bad `custom`
    /// field must never stop a tap from being handled.
    pub fn custom_data(&self) -> CustomData {
        let Some(raw) = self.0.get(CUSTOM_KEY) else {
            return CustomData::default();
        };

        CustomData::parse(raw).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "ignoring malformed custom field");
            CustomData::default()
        })
    }
}

impl From<Map<String, Value>> for PushPayload {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Decoded `custom` mapping of a push payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomData(Map<String, Value>);

impl CustomData {
    /// Decode a raw `custom` value.
    ///
    /// The wire format carries the mapping string-encoded; some transports
    /// deliver it already decoded, which is accepted as-is.
    pub fn parse(raw: &Value) -> Result<Self, CustomDataError> {
        match raw {
            Value::String(s) => Ok(Self(serde_json::from_str(s)?)),
            Value::Object(fields) => Ok(Self(fields.clone())),
            Value::Null => Err(CustomDataError::UnsupportedType("null")),
            Value::Bool(_) => Err(CustomDataError::UnsupportedType("bool")),
            Value::Number(_) => Err(CustomDataError::UnsupportedType("number")),
            Value::Array(_) => Err(CustomDataError::UnsupportedType("array")),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// URL to open in a browser, if the `u` field holds a non-blank string.
    pub fn launch_url(&self) -> Option<LaunchUrl> {
        self.0
            .get(LAUNCH_URL_KEY)
            .and_then(Value::as_str)
            .and_then(LaunchUrl::parse)
    }

    /// Notification ID assigned by the push service.
    pub fn notification_id(&self) -> Option<&str> {
        self.0.get(NOTIFICATION_ID_KEY).and_then(Value::as_str)
    }

    /// Developer-supplied additional data.
    pub fn additional_data(&self) -> Option<&Map<String, Value>> {
        self.0.get(ADDITIONAL_DATA_KEY).and_then(Value::as_object)
    }

    /// Whether the additional data carries the in-app preview marker.
    pub fn is_in_app_preview(&self) -> bool {
        self.additional_data()
            .is_some_and(|data| data.contains_key(IN_APP_PREVIEW_KEY))
    }

    /// In-app message preview UUID.
    pub fn in_app_preview_id(&self) -> Option<&str> {
        self.additional_data()?
            .get(IN_APP_PREVIEW_KEY)
            .and_then(Value::as_str)
    }
}
