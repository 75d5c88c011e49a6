//! Text pipeline for chatcloud.
//!
//! This module contains:
//! - [`normalizer`] - Persian orthographic normalization
//! - [`tokenizer`] - Word segmentation behind the [`Tokenizer`] trait
//! - [`stopwords`] - Stop-word loading and lookup
//! - [`aggregate`] - Filtering and concatenation of message text
//!
//! # Quick Start
//!
//! ```rust
//! use chatcloud::config::TextPolicy;
//! use chatcloud::core::{Normalizer, StopWordSet, WordTokenizer, aggregate_text};
//! use chatcloud::Message;
//!
//! let normalizer = Normalizer::new();
//! let stop_words = StopWordSet::from_text("و\nبه", &normalizer);
//! let messages = vec![Message::new("نان و پنیر")];
//!
//! let text = aggregate_text(&messages, &WordTokenizer, &stop_words, TextPolicy::PlainOnly);
//! assert_eq!(normalizer.normalize(&text), "نان پنیر");
//! ```

pub mod aggregate;
pub mod normalizer;
pub mod stopwords;
pub mod tokenizer;

pub use aggregate::{aggregate_text, append_message};
pub use normalizer::{Normalizer, ZWNJ};
pub use stopwords::{BUNDLED_STOPWORDS, StopWordSet};
pub use tokenizer::{Tokenizer, Tokens, WordTokenizer};
