//! Configuration types for the text pipeline and the renderer.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`NormalizerConfig`] - which rewrite rules the [`Normalizer`](crate::core::Normalizer) applies
//! - [`CloudConfig`] - image size, font, layout knobs
//! - [`TextPolicy`] - which message payloads take part in word counting
//!
//! # Example
//!
//! ```rust
//! use chatcloud::config::CloudConfig;
//!
//! let config = CloudConfig::new()
//!     .with_size(1024, 768)
//!     .with_max_font_size(180)
//!     .with_seed(7);
//!
//! assert_eq!(config.width, 1024);
//! assert_eq!(config.seed, Some(7));
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ChatcloudError, Result};

/// Largest canvas accepted by [`CloudConfig::validate`], in pixels.
pub const MAX_PIXELS: u64 = 40_000_000;

/// Number of characters handed to the shaping step at most.
pub const DEFAULT_MAX_CHARS: usize = 100_000;

/// Which message payloads contribute to the aggregated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextPolicy {
    /// Only messages whose `text` is a plain string (default).
    #[default]
    PlainOnly,

    /// Also flatten Telegram rich-text arrays into plain text.
    IncludeRich,
}

/// Rule groups applied by the normalizer.
///
/// All rules are enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct NormalizerConfig {
    /// Unify Arabic letter variants and digits to their Persian forms.
    pub unify_characters: bool,

    /// Strip harakat and tatweel.
    pub remove_diacritics: bool,

    /// Fix spacing around punctuation and collapse whitespace.
    pub fix_spacing: bool,

    /// Attach standalone `می`/`نمی` prefixes and plural suffixes with ZWNJ.
    pub join_affixes: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            unify_characters: true,
            remove_diacritics: true,
            fix_spacing: true,
            join_affixes: true,
        }
    }
}

impl NormalizerConfig {
    /// Creates a configuration with every rule enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables character unification.
    #[must_use]
    pub fn with_unify_characters(mut self, enabled: bool) -> Self {
        self.unify_characters = enabled;
        self
    }

    /// Enables or disables diacritic removal.
    #[must_use]
    pub fn with_remove_diacritics(mut self, enabled: bool) -> Self {
        self.remove_diacritics = enabled;
        self
    }

    /// Enables or disables spacing fixes.
    #[must_use]
    pub fn with_fix_spacing(mut self, enabled: bool) -> Self {
        self.fix_spacing = enabled;
        self
    }

    /// Enables or disables affix joining.
    #[must_use]
    pub fn with_join_affixes(mut self, enabled: bool) -> Self {
        self.join_affixes = enabled;
        self
    }
}

/// Settings for word-cloud generation.
///
/// `width`, `height` and `max_font_size` are forwarded to the renderer
/// unchanged; the remaining fields tune the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Output width in pixels (default: 800)
    pub width: u32,

    /// Output height in pixels (default: 600)
    pub height: u32,

    /// Font size of the most frequent word (default: 250)
    pub max_font_size: u32,

    /// Words that don't fit at this size are dropped (default: 4)
    pub min_font_size: u32,

    /// Maximum number of words drawn (default: 200)
    pub max_words: usize,

    /// Characters of normalized text kept before shaping (default: 100,000)
    pub max_chars: usize,

    /// Background RGBA color (default: opaque white)
    pub background: [u8; 4],

    /// Font file able to render Arabic script; the bundled DejaVu Sans when `None`
    pub font_path: Option<PathBuf>,

    /// How much word size follows frequency, 0.0 to 1.0 (default: 0.5)
    pub relative_scaling: f32,

    /// Empty pixels kept around each word (default: 2)
    pub margin: u32,

    /// RNG seed for placement and colors; random when `None`
    pub seed: Option<u64>,

    /// Which messages are counted (default: plain text only)
    pub text_policy: TextPolicy,

    /// Also drop common English words from the cloud (default: off)
    pub english_stopwords: bool,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            max_font_size: 250,
            min_font_size: 4,
            max_words: 200,
            max_chars: DEFAULT_MAX_CHARS,
            background: [255, 255, 255, 255],
            font_path: None,
            relative_scaling: 0.5,
            margin: 2,
            seed: None,
            text_policy: TextPolicy::PlainOnly,
            english_stopwords: false,
        }
    }
}

impl CloudConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output dimensions.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the font size of the most frequent word.
    #[must_use]
    pub fn with_max_font_size(mut self, size: u32) -> Self {
        self.max_font_size = size;
        self
    }

    /// Sets the smallest font size tried before a word is dropped.
    #[must_use]
    pub fn with_min_font_size(mut self, size: u32) -> Self {
        self.min_font_size = size;
        self
    }

    /// Sets the maximum number of words.
    #[must_use]
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    /// Sets the character budget for shaping.
    #[must_use]
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Sets the background color.
    #[must_use]
    pub fn with_background(mut self, rgba: [u8; 4]) -> Self {
        self.background = rgba;
        self
    }

    /// Sets the font file used instead of the bundled one.
    #[must_use]
    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    /// Sets the relative scaling factor.
    #[must_use]
    pub fn with_relative_scaling(mut self, scaling: f32) -> Self {
        self.relative_scaling = scaling;
        self
    }

    /// Sets the margin around words.
    #[must_use]
    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Fixes the RNG seed so layout and colors are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets which messages contribute text.
    #[must_use]
    pub fn with_text_policy(mut self, policy: TextPolicy) -> Self {
        self.text_policy = policy;
        self
    }

    /// Drops common English words in mixed-language chats.
    #[must_use]
    pub fn with_english_stopwords(mut self, enabled: bool) -> Self {
        self.english_stopwords = enabled;
        self
    }

    /// Checks that the settings describe a drawable image.
    ///
    /// # Errors
    ///
    /// Returns [`ChatcloudError::InvalidConfig`] for zero dimensions, a canvas
    /// above [`MAX_PIXELS`], a zero maximum font size, a minimum font size
    /// above the maximum, or a relative scaling outside `0.0..=1.0`.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ChatcloudError::InvalidConfig(format!(
                "image size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if u64::from(self.width) * u64::from(self.height) > MAX_PIXELS {
            return Err(ChatcloudError::InvalidConfig(format!(
                "image size {}x{} exceeds the limit of {} pixels",
                self.width, self.height, MAX_PIXELS
            )));
        }
        if self.max_font_size == 0 {
            return Err(ChatcloudError::InvalidConfig(
                "max_font_size must be positive".to_string(),
            ));
        }
        if self.min_font_size > self.max_font_size {
            return Err(ChatcloudError::InvalidConfig(format!(
                "min_font_size ({}) exceeds max_font_size ({})",
                self.min_font_size, self.max_font_size
            )));
        }
        if !(0.0..=1.0).contains(&self.relative_scaling) {
            return Err(ChatcloudError::InvalidConfig(format!(
                "relative_scaling must be within 0.0..=1.0, got {}",
                self.relative_scaling
            )));
        }
        Ok(())
    }
}
