//! Persian orthographic normalization.
//!
//! Chat text mixes Arabic and Persian letterforms, Latin and Arabic-Indic
//! digits, stray diacritics and inconsistent spacing. [`Normalizer`] rewrites
//! all of these to one canonical form so equal words compare equal.
//!
//! # Rules
//!
//! Applied in this order:
//!
//! | Step | Example |
//! |------|---------|
//! | Character unification | `كتاب` → `کتاب`, `علي` → `علی`, `12` → `۱۲` |
//! | Diacritics and tatweel | `كِتـــاب` → `کتاب` |
//! | ZWNJ cleanup | `کتاب‌ ها` → `کتاب ها` |
//! | Punctuation spacing | `سلام ،خوبی` → `سلام، خوبی` |
//! | Whitespace | `a   b` → `a b` |
//! | Affixes | `می روم` → `می‌روم`, `کتاب ها` → `کتاب‌ها` |
//!
//! The output of every step satisfies the preconditions of the steps before
//! it, which makes [`Normalizer::normalize`] idempotent.
//!
//! # Example
//!
//! ```
//! use chatcloud::core::Normalizer;
//!
//! let normalizer = Normalizer::new();
//! let once = normalizer.normalize("كتاب ها را مي خوانم ؟");
//! assert_eq!(once, "کتاب\u{200C}ها را می\u{200C}خوانم؟");
//! assert_eq!(normalizer.normalize(&once), once);
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::config::NormalizerConfig;

/// Zero-width non-joiner.
pub const ZWNJ: char = '\u{200C}';

const PREFIXES: &[&str] = &["می", "نمی"];
const SUFFIXES: &[&str] = &["ها", "های", "هایی", "تر", "ترین"];

static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+([.،؛:؟!])").expect("valid regex"));
static MISSING_SPACE_AFTER_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.،؛:؟!])([\p{Arabic}&&\p{L}])").expect("valid regex"));
static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("valid regex"));
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Canonicalizes Persian text.
///
/// Stateless apart from its [`NormalizerConfig`]; cheap to clone and share.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    /// Creates a normalizer with every rule enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a normalizer with a custom rule selection.
    pub fn with_config(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Returns the active rule selection.
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Returns the canonical form of `text`.
    pub fn normalize(&self, text: &str) -> String {
        let mut result: String = text
            .chars()
            .filter(|&c| !(self.config.remove_diacritics && is_diacritic(c)))
            .map(|c| {
                if self.config.unify_characters {
                    unify_char(c)
                } else {
                    c
                }
            })
            .collect();

        if self.config.fix_spacing {
            result = clean_zwnj(&result);
            result = SPACE_BEFORE_PUNCT.replace_all(&result, "$1").into_owned();
            result = MISSING_SPACE_AFTER_PUNCT
                .replace_all(&result, "$1 $2")
                .into_owned();
            result = collapse_whitespace(&result);
        }

        if self.config.join_affixes {
            result = result
                .split('\n')
                .map(join_affixes)
                .collect::<Vec<_>>()
                .join("\n");
        }

        result
    }
}

/// Maps Arabic letter variants, digits and a few punctuation marks to their
/// Persian counterparts.
fn unify_char(c: char) -> char {
    match c {
        'ك' => 'ک',
        'ي' | 'ى' => 'ی',
        '0'..='9' => shift_digit(c, '0'),
        '٠'..='٩' => shift_digit(c, '٠'),
        '%' => '٪',
        ';' => '؛',
        '“' => '«',
        '”' => '»',
        _ => c,
    }
}

fn shift_digit(c: char, zero: char) -> char {
    char::from_u32('۰' as u32 + (c as u32 - zero as u32)).unwrap_or(c)
}

/// Harakat, superscript alef and tatweel.
fn is_diacritic(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{0652}' | '\u{0670}' | '\u{0640}')
}

/// Drops ZWNJ that is repeated, touches whitespace, or sits at either end.
fn clean_zwnj(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == ZWNJ {
            match out.chars().last() {
                Some(last) if last != ZWNJ && !last.is_whitespace() => out.push(c),
                _ => {}
            }
        } else {
            if c.is_whitespace() && out.ends_with(ZWNJ) {
                out.pop();
            }
            out.push(c);
        }
    }
    if out.ends_with(ZWNJ) {
        out.pop();
    }
    out
}

fn collapse_whitespace(text: &str) -> String {
    let spaced = HORIZONTAL_SPACE.replace_all(text, " ");
    let lines = spaced
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");
    BLANK_LINES.replace_all(&lines, "\n\n").trim().to_string()
}

/// Attaches standalone prefixes to the next word and suffixes to the previous
/// one, within a single line.
fn join_affixes(line: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    for word in line.split(' ') {
        if let Some(prev) = words.last_mut() {
            let attach_to_prefix = PREFIXES.contains(&prev.as_str()) && starts_with_letter(word);
            let attach_suffix = SUFFIXES.contains(&word) && ends_with_letter(prev);
            if attach_to_prefix || attach_suffix {
                prev.push(ZWNJ);
                prev.push_str(word);
                continue;
            }
        }
        words.push(word.to_string());
    }
    words.join(" ")
}

fn starts_with_letter(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_alphabetic)
}

fn ends_with_letter(word: &str) -> bool {
    word.chars().next_back().is_some_and(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str) -> String {
        Normalizer::new().normalize(text)
    }

    #[test]
    fn test_unify_arabic_letters() {
        assert_eq!(normalize("كيف"), "کیف");
        assert_eq!(normalize("مصطفى"), "مصطفی");
    }

    #[test]
    fn test_unify_digits() {
        assert_eq!(normalize("2024"), "۲۰۲۴");
        assert_eq!(normalize("٣٤"), "۳۴");
        assert_eq!(normalize("50%"), "۵۰٪");
    }

    #[test]
    fn test_remove_diacritics_and_tatweel() {
        assert_eq!(normalize("کِتاب"), "کتاب");
        assert_eq!(normalize("بـــزرگ"), "بزرگ");
        assert_eq!(normalize("مُحَمَّد"), "محمد");
    }

    #[test]
    fn test_zwnj_cleanup() {
        assert_eq!(normalize("\u{200C}سلام\u{200C}"), "سلام");
        assert_eq!(normalize("خانه\u{200C}\u{200C}ای"), "خانه\u{200C}ای");
        assert_eq!(normalize("خانه\u{200C} دوم"), "خانه دوم");
    }

    #[test]
    fn test_punctuation_spacing() {
        assert_eq!(normalize("سلام ، خوبی ؟"), "سلام، خوبی؟");
        assert_eq!(normalize("سلام.خوبی"), "سلام. خوبی");
        assert_eq!(normalize("example.com"), "example.com");
        assert_eq!(normalize("۳.۵"), "۳.۵");
    }

    #[test]
    fn test_whitespace_collapse() {
        assert_eq!(normalize("  سلام \t  دنیا  "), "سلام دنیا");
        assert_eq!(normalize("الف\n\n\n\nب"), "الف\n\nب");
        assert_eq!(normalize("الف  \n  ب"), "الف\nب");
    }

    #[test]
    fn test_prefix_joining() {
        assert_eq!(normalize("می روم"), "می\u{200C}روم");
        assert_eq!(normalize("نمی دانم"), "نمی\u{200C}دانم");
        // A lone prefix at the end of a line has nothing to attach to.
        assert_eq!(normalize("او می"), "او می");
    }

    #[test]
    fn test_suffix_joining() {
        assert_eq!(normalize("کتاب ها"), "کتاب\u{200C}ها");
        assert_eq!(normalize("بزرگ ترین"), "بزرگ\u{200C}ترین");
        assert_eq!(normalize("ها"), "ها");
        assert_eq!(normalize("۱۲ ها"), "۱۲ ها");
    }

    #[test]
    fn test_affixes_do_not_cross_lines() {
        assert_eq!(normalize("می\nروم"), "می\nروم");
    }

    #[test]
    fn test_idempotent_on_samples() {
        let samples = [
            "كتاب ها را مي خوانم ؟",
            "می می روم",
            "الف ها ها",
            " \u{200C} می \u{200C} ها \u{200C} ",
            "سلام ،،خوبی؟!چطوری",
            "x \u{200C}، y",
            "،\u{200C}ب",
            "a\n \n \n \nb",
            "نمی ها تر",
        ];
        let normalizer = Normalizer::new();
        for sample in samples {
            let once = normalizer.normalize(sample);
            assert_eq!(normalizer.normalize(&once), once, "sample: {sample:?}");
        }
    }

    #[test]
    fn test_disabled_rules() {
        let normalizer = Normalizer::with_config(
            NormalizerConfig::new()
                .with_unify_characters(false)
                .with_join_affixes(false),
        );
        assert_eq!(normalizer.normalize("كتاب ها"), "كتاب ها");
        assert!(!normalizer.config().join_affixes);
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }
}
