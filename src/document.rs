//! The loaded chat export.
//!
//! A [`ChatDocument`] is created once from a file or string and never
//! modified afterwards.
//!
//! # Example
//!
//! ```
//! use chatcloud::ChatDocument;
//!
//! let doc: ChatDocument = r#"{"messages": [{"text": "سلام"}]}"#.parse()?;
//! assert_eq!(doc.len(), 1);
//! # Ok::<(), chatcloud::ChatcloudError>(())
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::error::{ChatcloudError, Result};
use crate::message::Message;
use crate::parsing::parse_telegram_export;

/// An ordered, immutable sequence of chat messages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatDocument {
    messages: Vec<Message>,
}

impl ChatDocument {
    /// Wraps an already parsed message list.
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Reads and parses a chat export from disk.
    ///
    /// # Errors
    ///
    /// - [`ChatcloudError::Io`] if the file can't be read
    /// - [`ChatcloudError::Parse`] if it isn't JSON
    /// - [`ChatcloudError::InvalidFormat`] if it has no usable `messages` array
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading chat data from {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| ChatcloudError::io(path, e))?;
        let messages = parse_telegram_export(&content, Some(path))?;

        info!("Loaded {} messages", messages.len());
        Ok(Self { messages })
    }

    /// Returns the messages in document order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if the export has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the number of messages whose text is a plain string.
    pub fn plain_count(&self) -> usize {
        self.messages.iter().filter(|m| m.text.is_plain()).count()
    }
}

impl FromStr for ChatDocument {
    type Err = ChatcloudError;

    fn from_str(s: &str) -> Result<Self> {
        parse_telegram_export(s, None).map(Self::new)
    }
}
