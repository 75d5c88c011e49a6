//! Unified error types for chatcloud.
//!
//! This module provides a single [`ChatcloudError`] enum that covers all error
//! cases in the library. Errors fall into three families:
//!
//! - **Resource errors**: a file could not be read or written, or the font
//!   could not be loaded ([`Io`](ChatcloudError::Io), [`Font`](ChatcloudError::Font))
//! - **Format errors**: the chat export is not valid JSON or does not have the
//!   expected shape ([`Parse`](ChatcloudError::Parse),
//!   [`InvalidFormat`](ChatcloudError::InvalidFormat))
//! - **Rendering errors**: shaping, bidi reordering or image encoding failed
//!
//! Nothing in the pipeline recovers from an error; every failure surfaces to
//! the caller of [`ChatStatistics`](crate::ChatStatistics).

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A specialized [`Result`] type for chatcloud operations.
///
/// # Example
///
/// ```rust
/// use chatcloud::error::Result;
///
/// fn my_function() -> Result<String> {
///     Ok(String::new())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatcloudError>;

/// The error type for all chatcloud operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatcloudError {
    /// An I/O error occurred while reading an input or writing the image.
    ///
    /// This typically happens when:
    /// - The chat export or stop-word file doesn't exist
    /// - Permission denied
    /// - The output directory doesn't exist
    #[error("IO error ({}): {source}", path.display())]
    Io {
        /// The file that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The chat export is not valid JSON.
    #[error("Failed to parse {format} export{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The format being parsed (e.g., "Telegram JSON")
        format: &'static str,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The chat export is valid JSON but doesn't match the expected structure.
    ///
    /// This occurs when:
    /// - The top-level `messages` field is missing
    /// - `messages` is not an array
    /// - A message has no `text` field
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A configuration value can't produce an image.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The glyph resource could not be loaded.
    #[error("Failed to load font {}: {message}", path.display())]
    Font {
        /// Path of the font file
        path: PathBuf,
        /// Description of what went wrong
        message: String,
    },

    /// Text could not be shaped into presentation forms.
    #[error("Shaping error: {0}")]
    Shaping(String),

    /// Text could not be reordered for display.
    #[error("Bidi error: {0}")]
    Bidi(String),

    /// The rendered image could not be encoded.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatcloudError {
    /// Creates an I/O error tied to a path.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        ChatcloudError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a parse error for the Telegram export format.
    pub fn telegram_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ChatcloudError::Parse {
            format: "Telegram JSON",
            source,
            path,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatcloudError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates a font loading error.
    pub fn font(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        ChatcloudError::Font {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatcloudError::Io { .. })
    }

    /// Returns `true` if the chat export was malformed, either syntactically
    /// or structurally.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            ChatcloudError::Parse { .. } | ChatcloudError::InvalidFormat { .. }
        )
    }

    /// Returns `true` if the font could not be loaded.
    pub fn is_font(&self) -> bool {
        matches!(self, ChatcloudError::Font { .. })
    }

    /// Returns `true` if the failure happened while turning text into an image.
    pub fn is_render_error(&self) -> bool {
        matches!(
            self,
            ChatcloudError::Shaping(_) | ChatcloudError::Bidi(_) | ChatcloudError::Image(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
