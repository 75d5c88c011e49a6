//! Turning aggregated text into a word-cloud image.
//!
//! The render stage is split into three narrow capabilities so each one can be
//! swapped out:
//!
//! - [`Shaper`] - replaces letters with their contextual presentation forms
//! - [`BidiReorder`] - converts logical order to visual order
//! - [`CloudRenderer`] - lays out and rasterizes the words, returning PNG bytes
//!
//! [`Renderer`] bundles one implementation of each. [`Renderer::default`]
//! wires up [`ArabicShaper`], [`UnicodeBidiReorder`] and [`WordCloudRenderer`].
//!
//! # Example
//!
//! ```rust
//! use chatcloud::config::CloudConfig;
//! use chatcloud::core::Normalizer;
//! use chatcloud::render::{Renderer, prepare_text};
//!
//! let renderer = Renderer::default();
//! let text = prepare_text(" سلام دنیا", &Normalizer::new(), &renderer, &CloudConfig::default())?;
//! assert!(!text.is_empty());
//! # Ok::<(), chatcloud::ChatcloudError>(())
//! ```

pub mod bidi;
pub mod cloud;
pub mod shaping;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::CloudConfig;
use crate::core::Normalizer;
use crate::error::{ChatcloudError, Result};

pub use bidi::{BaseDirection, UnicodeBidiReorder};
pub use cloud::{
    BUNDLED_FONT, ENGLISH_STOPWORDS, GlyphFont, PlacedWord, WordCloudRenderer, word_frequencies,
    word_frequencies_without_english,
};
pub use shaping::ArabicShaper;

/// File name of the generated image inside the output directory.
pub const OUTPUT_FILE_NAME: &str = "wordcloud.png";

/// Joins letters into their contextual presentation forms.
pub trait Shaper {
    /// Returns the shaped text, still in logical order.
    fn shape(&self, text: &str) -> Result<String>;
}

/// Converts logical-order text into display order.
pub trait BidiReorder {
    /// Returns the text in visual order, line by line.
    fn reorder(&self, text: &str) -> Result<String>;
}

/// Produces an encoded image from display-ready text.
pub trait CloudRenderer {
    /// Renders `text` with the settings in `config` and returns PNG bytes.
    fn render(&self, text: &str, config: &CloudConfig) -> Result<Vec<u8>>;
}

/// The three render capabilities used by a generation call.
pub struct Renderer {
    shaper: Box<dyn Shaper>,
    bidi: Box<dyn BidiReorder>,
    cloud: Box<dyn CloudRenderer>,
}

impl Renderer {
    /// Creates a renderer from custom capabilities.
    pub fn new(
        shaper: impl Shaper + 'static,
        bidi: impl BidiReorder + 'static,
        cloud: impl CloudRenderer + 'static,
    ) -> Self {
        Self {
            shaper: Box::new(shaper),
            bidi: Box::new(bidi),
            cloud: Box::new(cloud),
        }
    }

    pub fn shaper(&self) -> &dyn Shaper {
        self.shaper.as_ref()
    }

    pub fn bidi(&self) -> &dyn BidiReorder {
        self.bidi.as_ref()
    }

    pub fn cloud(&self) -> &dyn CloudRenderer {
        self.cloud.as_ref()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(ArabicShaper, UnicodeBidiReorder::default(), WordCloudRenderer)
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}

/// Returns at most the first `max_chars` characters of `text`.
///
/// # Example
///
/// ```
/// use chatcloud::render::truncate_chars;
///
/// assert_eq!(truncate_chars("سلام", 2), "سل");
/// assert_eq!(truncate_chars("ab", 10), "ab");
/// ```
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Normalizes, truncates, shapes and reorders the aggregated text.
///
/// The result is what [`CloudRenderer::render`] receives.
pub fn prepare_text(
    aggregate: &str,
    normalizer: &Normalizer,
    renderer: &Renderer,
    config: &CloudConfig,
) -> Result<String> {
    let normalized = normalizer.normalize(aggregate);
    let truncated = truncate_chars(&normalized, config.max_chars);
    debug!(
        "Normalized text: {} chars, {} kept for shaping",
        normalized.chars().count(),
        truncated.chars().count()
    );

    let shaped = renderer.shaper.shape(truncated)?;
    renderer.bidi.reorder(&shaped)
}

/// Renders display-ready text with the renderer's cloud capability.
pub fn render_cloud(text: &str, renderer: &Renderer, config: &CloudConfig) -> Result<Vec<u8>> {
    let bytes = renderer.cloud.render(text, config)?;
    debug!("Encoded image: {} bytes", bytes.len());
    Ok(bytes)
}

/// Writes the encoded image to `<output_dir>/wordcloud.png`, replacing any
/// existing file, and returns the written path.
///
/// The directory must already exist.
pub fn write_word_cloud(output_dir: impl AsRef<Path>, bytes: &[u8]) -> Result<PathBuf> {
    let path = output_dir.as_ref().join(OUTPUT_FILE_NAME);
    fs::write(&path, bytes).map_err(|e| ChatcloudError::io(&path, e))?;
    info!("Word cloud written to {}", path.display());
    Ok(path)
}
