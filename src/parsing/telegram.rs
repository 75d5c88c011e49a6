//! Telegram JSON export parsing.
//!
//! Telegram Desktop exports a chat as a single JSON document:
//!
//! ```json
//! {
//!   "name": "Chat Name",
//!   "messages": [
//!     {"id": 1, "type": "message", "from": "Sara", "text": "سلام"},
//!     {"id": 2, "type": "message", "from": "Ali", "text": ["see ", {"type": "link", "text": "url"}]}
//!   ]
//! }
//! ```
//!
//! Only the `messages` array and each record's `text` are required.

use std::path::Path;

use serde_json::Value;

use crate::error::{ChatcloudError, Result};
use crate::message::Message;

/// Format name used in error messages.
pub const FORMAT: &str = "Telegram JSON";

/// Parses the contents of a Telegram export into its ordered message list.
///
/// Fails with [`ChatcloudError::Parse`] when the content is not JSON and with
/// [`ChatcloudError::InvalidFormat`] when the structure is wrong. No partial
/// result is ever returned.
pub fn parse_telegram_export(content: &str, path: Option<&Path>) -> Result<Vec<Message>> {
    let root: Value = serde_json::from_str(content)
        .map_err(|e| ChatcloudError::telegram_parse(e, path.map(Path::to_path_buf)))?;

    let Value::Object(mut root) = root else {
        return Err(ChatcloudError::invalid_format(
            FORMAT,
            "expected a JSON object at the top level",
        ));
    };

    let messages = root
        .remove("messages")
        .ok_or_else(|| ChatcloudError::invalid_format(FORMAT, "missing `messages` field"))?;

    let Value::Array(items) = messages else {
        return Err(ChatcloudError::invalid_format(
            FORMAT,
            "`messages` is not an array",
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Message>(item).map_err(|e| {
                ChatcloudError::invalid_format(FORMAT, format!("message #{index}: {e}"))
            })
        })
        .collect()
}

/// Extracts text content from Telegram's rich `text` field.
///
/// The field can be:
/// - A simple string: `"Hello"`
/// - An array with strings and objects: `["Text", {"type": "link", "text": "url"}]`
///
/// Entity objects contribute their own `text`; anything else contributes nothing.
///
/// # Example
///
/// ```
/// use chatcloud::parsing::telegram::extract_telegram_text;
/// use serde_json::json;
///
/// let complex = json!(["Check this: ", {"type": "link", "text": "https://example.com"}]);
/// assert_eq!(extract_telegram_text(&complex), "Check this: https://example.com");
/// ```
pub fn extract_telegram_text(text_value: &Value) -> String {
    match text_value {
        Value::String(s) => s.clone(),
        Value::Array(arr) => arr
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.as_str()),
                Value::Object(obj) => obj.get("text").and_then(|v| v.as_str()),
                _ => None,
            })
            .collect::<String>(),
        _ => String::new(),
    }
}
