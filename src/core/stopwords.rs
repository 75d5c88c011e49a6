//! Stop-word list loading and lookup.
//!
//! Stop-words are normalized once when loaded. Lookups compare tokens as they
//! are, without normalizing them first.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use super::normalizer::Normalizer;
use crate::error::{ChatcloudError, Result};

/// The Persian stop-word list shipped with the crate.
pub const BUNDLED_STOPWORDS: &str = include_str!("../../data/stopwords.txt");

/// An immutable set of normalized stop-words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    /// Creates an empty set that filters nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a set from newline-delimited text.
    ///
    /// Each line is trimmed and normalized. Blank lines are skipped and
    /// duplicates collapse.
    pub fn from_text(text: &str, normalizer: &Normalizer) -> Self {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| normalizer.normalize(line))
            .collect();
        Self { words }
    }

    /// Reads a stop-word file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatcloudError::Io`] if the file can't be read.
    pub fn from_path(path: impl AsRef<Path>, normalizer: &Normalizer) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ChatcloudError::io(path, e))?;
        let set = Self::from_text(&text, normalizer);
        info!("Loaded {} stop-words from {}", set.len(), path.display());
        Ok(set)
    }

    /// Returns the bundled Persian stop-word list.
    pub fn bundled(normalizer: &Normalizer) -> Self {
        Self::from_text(BUNDLED_STOPWORDS, normalizer)
    }

    /// Returns `true` if `token` is a stop-word.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Returns the number of distinct stop-words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates over the stop-words in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for StopWordSet {
    /// Collects already normalized words.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}
