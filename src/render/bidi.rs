//! Logical-to-visual reordering with the Unicode Bidirectional Algorithm.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use unicode_bidi::{BidiInfo, Level};

use super::BidiReorder;
use crate::error::Result;

/// Paragraph direction used when reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseDirection {
    /// Detect from the first strong character of each line (default).
    #[default]
    Auto,
    /// Force right-to-left.
    Rtl,
    /// Force left-to-right.
    Ltr,
}

impl BaseDirection {
    fn level(self) -> Option<Level> {
        match self {
            BaseDirection::Auto => None,
            BaseDirection::Rtl => Some(Level::rtl()),
            BaseDirection::Ltr => Some(Level::ltr()),
        }
    }
}

/// Reorders text into display order using `unicode-bidi`.
///
/// Every line is treated as its own paragraph, so line breaks stay where they
/// are and only the characters within each line move.
///
/// # Example
///
/// ```
/// use chatcloud::render::{BidiReorder, UnicodeBidiReorder};
///
/// let visual = UnicodeBidiReorder::default().reorder("سلام")?;
/// assert_eq!(visual, "مالس");
/// # Ok::<(), chatcloud::ChatcloudError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeBidiReorder {
    direction: BaseDirection,
}

impl UnicodeBidiReorder {
    /// Creates a reorderer with a fixed base direction.
    pub fn new(direction: BaseDirection) -> Self {
        Self { direction }
    }

    pub fn direction(&self) -> BaseDirection {
        self.direction
    }

    fn reorder_line<'a>(&self, line: &'a str) -> Cow<'a, str> {
        if line.is_empty() {
            return Cow::Borrowed(line);
        }
        let info = BidiInfo::new(line, self.direction.level());
        if !info.has_rtl() {
            return Cow::Borrowed(line);
        }
        let mut visual = String::with_capacity(line.len());
        for para in &info.paragraphs {
            visual.push_str(&info.reorder_line(para, para.range.clone()));
        }
        Cow::Owned(visual)
    }
}

impl BidiReorder for UnicodeBidiReorder {
    fn reorder(&self, text: &str) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&self.reorder_line(line));
        }
        Ok(out)
    }
}
