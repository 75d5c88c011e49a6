//! The word-cloud generator.
//!
//! [`ChatStatistics`] owns everything loaded at startup (the chat document,
//! the normalized stop-words and the normalizer) and runs the pipeline on
//! demand:
//!
//! ```text
//! messages -> tokenize + filter -> aggregate -> normalize -> truncate
//!          -> shape -> reorder -> render -> <output_dir>/wordcloud.png
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use chatcloud::{ChatStatistics, CloudConfig};
//!
//! let stats = ChatStatistics::from_paths("result.json", "data/stopwords.txt")?;
//! let path = stats.generate_word_cloud("out", &CloudConfig::default())?;
//! println!("saved {}", path.display());
//! # Ok::<(), chatcloud::ChatcloudError>(())
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{CloudConfig, TextPolicy};
use crate::core::{Normalizer, StopWordSet, Tokenizer, WordTokenizer, aggregate_text};
use crate::document::ChatDocument;
use crate::error::Result;
use crate::render::{self, Renderer, render_cloud, write_word_cloud};

/// Loaded chat data plus the text tools needed to turn it into a word cloud.
///
/// Read-only after construction; [`generate_word_cloud`](Self::generate_word_cloud)
/// can be called any number of times.
pub struct ChatStatistics {
    document: ChatDocument,
    stop_words: StopWordSet,
    normalizer: Normalizer,
    tokenizer: Box<dyn Tokenizer>,
}

impl ChatStatistics {
    /// Assembles a generator from parts, using [`WordTokenizer`].
    pub fn new(document: ChatDocument, stop_words: StopWordSet, normalizer: Normalizer) -> Self {
        Self {
            document,
            stop_words,
            normalizer,
            tokenizer: Box::new(WordTokenizer),
        }
    }

    /// Loads a Telegram export and a stop-word file.
    ///
    /// # Errors
    ///
    /// Fails if either file is unreadable or the export is malformed. Nothing
    /// is kept on failure.
    pub fn from_paths(chat_path: impl AsRef<Path>, stop_words_path: impl AsRef<Path>) -> Result<Self> {
        let normalizer = Normalizer::new();
        let document = ChatDocument::from_path(chat_path)?;
        let stop_words = StopWordSet::from_path(stop_words_path, &normalizer)?;
        Ok(Self::new(document, stop_words, normalizer))
    }

    /// Loads a Telegram export and uses the bundled stop-word list.
    pub fn from_path(chat_path: impl AsRef<Path>) -> Result<Self> {
        let normalizer = Normalizer::new();
        let document = ChatDocument::from_path(chat_path)?;
        let stop_words = StopWordSet::bundled(&normalizer);
        info!("Using {} bundled stop-words", stop_words.len());
        Ok(Self::new(document, stop_words, normalizer))
    }

    /// Replaces the tokenizer.
    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: impl Tokenizer + 'static) -> Self {
        self.tokenizer = Box::new(tokenizer);
        self
    }

    pub fn document(&self) -> &ChatDocument {
        &self.document
    }

    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Builds the filtered, space-joined text of all qualifying messages.
    pub fn aggregate_text(&self, policy: TextPolicy) -> String {
        aggregate_text(
            self.document.messages(),
            self.tokenizer.as_ref(),
            &self.stop_words,
            policy,
        )
    }

    /// Returns the display-ready text the cloud renderer would receive.
    pub fn prepare_text(&self, renderer: &Renderer, config: &CloudConfig) -> Result<String> {
        let aggregate = self.aggregate_text(config.text_policy);
        debug!("Aggregated text: {} chars", aggregate.chars().count());
        render::prepare_text(&aggregate, &self.normalizer, renderer, config)
    }

    /// Renders the word cloud with the default renderer and writes it to
    /// `<output_dir>/wordcloud.png`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the font can't be
    /// loaded, rendering fails or the file can't be written. No file is
    /// written unless rendering succeeded.
    pub fn generate_word_cloud(&self, output_dir: impl AsRef<Path>, config: &CloudConfig) -> Result<PathBuf> {
        self.generate_word_cloud_with(&Renderer::default(), output_dir, config)
    }

    /// Same as [`generate_word_cloud`](Self::generate_word_cloud) with a
    /// custom renderer.
    pub fn generate_word_cloud_with(
        &self,
        renderer: &Renderer,
        output_dir: impl AsRef<Path>,
        config: &CloudConfig,
    ) -> Result<PathBuf> {
        config.validate()?;
        info!(
            "Generating {}x{} word cloud from {} messages",
            config.width,
            config.height,
            self.document.len()
        );

        let text = self.prepare_text(renderer, config)?;
        let bytes = render_cloud(&text, renderer, config)?;
        write_word_cloud(output_dir, &bytes)
    }
}

impl std::fmt::Debug for ChatStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatStatistics")
            .field("messages", &self.document.len())
            .field("stop_words", &self.stop_words.len())
            .field("normalizer", &self.normalizer)
            .finish_non_exhaustive()
    }
}
