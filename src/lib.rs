//! # Chatcloud
//!
//! A Rust library that turns a Persian Telegram chat export into a word-cloud
//! image of the most frequent meaningful words.
//!
//! ## Overview
//!
//! The pipeline is linear:
//!
//! 1. **Load** the export ([`ChatDocument`]) and a stop-word list
//!    ([`StopWordSet`](core::StopWordSet)), normalizing every stop-word.
//! 2. **Tokenize and filter** each plain-text message, dropping stop-words,
//!    and concatenate the survivors.
//! 3. **Normalize** the aggregate once and truncate it to 100,000 characters.
//! 4. **Shape** Arabic letters into their joined forms and **reorder** the
//!    text into display order.
//! 5. **Render** the word cloud and write `wordcloud.png`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatcloud::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let stats = ChatStatistics::from_paths("result.json", "data/stopwords.txt")?;
//!     // Without a font path the bundled DejaVu Sans is used.
//!     let config = CloudConfig::new()
//!         .with_font_path("fonts/Vazirmatn.ttf")
//!         .with_size(1200, 900);
//!     stats.generate_word_cloud("out", &config)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Inspecting Intermediate Stages
//!
//! Every stage is available on its own, and the render capabilities are
//! traits, so the text can be checked before any pixels are drawn:
//!
//! ```rust
//! use chatcloud::prelude::*;
//!
//! let normalizer = Normalizer::new();
//! let stop_words = StopWordSet::from_text("و", &normalizer);
//! let doc: ChatDocument = r#"{"messages": [{"text": "سلام و سلام دنیا"}]}"#.parse()?;
//! let stats = ChatStatistics::new(doc, stop_words, normalizer);
//!
//! assert_eq!(stats.aggregate_text(TextPolicy::PlainOnly), " سلام سلام دنیا");
//! # Ok::<(), ChatcloudError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`document`] - [`ChatDocument`], the loaded export
//! - [`message`] - [`Message`] and its tagged [`MessageText`](message::MessageText)
//! - [`parsing`] - Telegram JSON parsing
//! - [`core`] - Normalizer, tokenizer, stop-words and aggregation
//! - [`render`] - Shaping, bidi reordering, cloud layout, PNG output
//! - [`stats`] - [`ChatStatistics`], the pipeline owner
//! - [`config`] - [`CloudConfig`], [`NormalizerConfig`](config::NormalizerConfig)
//! - [`cli`] - CLI argument types (feature `cli`)
//! - [`error`] - Unified error types ([`ChatcloudError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod document;
pub mod error;
pub mod message;
pub mod parsing;
pub mod render;
pub mod stats;

// Re-export the main types at the crate root for convenience
pub use config::CloudConfig;
pub use document::ChatDocument;
pub use error::{ChatcloudError, Result};
pub use message::Message;
pub use stats::ChatStatistics;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatcloud::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::document::ChatDocument;
    pub use crate::message::{Message, MessageText};
    pub use crate::stats::ChatStatistics;

    // Error types
    pub use crate::error::{ChatcloudError, Result};

    // Configuration
    pub use crate::config::{CloudConfig, NormalizerConfig, TextPolicy};

    // Text pipeline
    pub use crate::core::{Normalizer, StopWordSet, Tokenizer, WordTokenizer, aggregate_text};

    // Rendering
    pub use crate::render::{
        ArabicShaper, BidiReorder, CloudRenderer, Renderer, Shaper, UnicodeBidiReorder,
        WordCloudRenderer,
    };
}
