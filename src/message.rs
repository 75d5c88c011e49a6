//! Chat message types.
//!
//! This module provides [`Message`], one record of a chat export, and
//! [`MessageText`], the tagged payload of its `text` field.
//!
//! # Overview
//!
//! Telegram stores the `text` of a message either as a plain string or, when
//! the message contains links, mentions or formatting, as an array mixing
//! strings and entity objects. Only the plain form takes part in word
//! counting; everything else is kept as [`MessageText::Rich`] and skipped.
//!
//! # Examples
//!
//! ```
//! use chatcloud::message::{Message, MessageText};
//!
//! let msg: Message = serde_json::from_str(r#"{"id": 7, "text": "سلام"}"#)?;
//! assert_eq!(msg.plain_text(), Some("سلام"));
//!
//! let rich: Message = serde_json::from_str(
//!     r#"{"text": ["see ", {"type": "link", "text": "https://t.me"}]}"#,
//! )?;
//! assert!(matches!(rich.text, MessageText::Rich(_)));
//! assert_eq!(rich.plain_text(), None);
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The payload of a message's `text` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageText {
    /// A plain string. This is the only form that is tokenized by default.
    Plain(String),

    /// Anything else: rich-text entity arrays, `null`, numbers, objects.
    Rich(Value),
}

impl MessageText {
    /// Returns the string if this is a plain-text payload.
    pub fn as_plain(&self) -> Option<&str> {
        match self {
            MessageText::Plain(s) => Some(s),
            MessageText::Rich(_) => None,
        }
    }

    /// Returns `true` for plain-text payloads.
    pub fn is_plain(&self) -> bool {
        matches!(self, MessageText::Plain(_))
    }
}

impl From<&str> for MessageText {
    fn from(s: &str) -> Self {
        MessageText::Plain(s.to_string())
    }
}

impl From<String> for MessageText {
    fn from(s: String) -> Self {
        MessageText::Plain(s)
    }
}

impl From<Value> for MessageText {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => MessageText::Plain(s),
            other => MessageText::Rich(other),
        }
    }
}

/// One record of a chat export.
///
/// Only `text` is required. The Telegram metadata fields are kept when they
/// have the expected type and silently dropped otherwise, so an export with
/// unusual extra fields still loads.
///
/// | Field | Telegram key | Description |
/// |-------|--------------|-------------|
/// | `id` | `id` | Message identifier |
/// | `msg_type` | `type` | `"message"`, `"service"`, ... |
/// | `from` | `from` | Sender display name |
/// | `text` | `text` | Plain string or rich-text value |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Platform message identifier.
    #[serde(default, deserialize_with = "lenient")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Telegram record type.
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg_type: Option<String>,

    /// Sender display name.
    #[serde(default, deserialize_with = "lenient")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// Message body.
    pub text: MessageText,
}

impl Message {
    /// Creates a message with the given text and no metadata.
    pub fn new(text: impl Into<MessageText>) -> Self {
        Self {
            id: None,
            msg_type: None,
            from: None,
            text: text.into(),
        }
    }

    /// Builder method to set the message ID.
    #[must_use]
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Builder method to set the sender.
    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Returns the text if it is a plain string.
    pub fn plain_text(&self) -> Option<&str> {
        self.text.as_plain()
    }
}

/// Deserializes an optional field, turning a type mismatch into `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}
