//! Contextual shaping for Arabic-script text.
//!
//! Fonts rendered without a shaping engine only draw the nominal (isolated)
//! letterforms. [`ArabicShaper`] rewrites each letter to the presentation form
//! that matches its neighbours, so a plain glyph rasterizer draws connected
//! words.
//!
//! | Form | Joins previous | Joins next |
//! |------|----------------|------------|
//! | Isolated | no | no |
//! | Initial | no | yes |
//! | Medial | yes | yes |
//! | Final | yes | no |

use super::Shaper;
use crate::error::Result;

const LAM: char = '\u{0644}';
const ZWJ: char = '\u{200D}';

/// How a character takes part in cursive joining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Joining {
    /// Joins on both sides.
    Dual,
    /// Joins only to the previous letter.
    Right,
    /// Forces joining on both sides without a form of its own (tatweel, ZWJ).
    Causing,
    /// Marks that are skipped when looking for neighbours.
    Transparent,
    /// Everything else, including ZWNJ, spaces and Latin letters.
    None,
}

/// Presentation forms of one letter: isolated, final, initial, medial.
///
/// Right-joining letters only have the first two.
struct Forms {
    isolated: char,
    final_: char,
    initial: Option<char>,
    medial: Option<char>,
}

const fn dual(isolated: u32) -> Forms {
    Forms {
        isolated: as_char(isolated),
        final_: as_char(isolated + 1),
        initial: Some(as_char(isolated + 2)),
        medial: Some(as_char(isolated + 3)),
    }
}

const fn right(isolated: u32) -> Forms {
    Forms {
        isolated: as_char(isolated),
        final_: as_char(isolated + 1),
        initial: None,
        medial: None,
    }
}

const fn as_char(code: u32) -> char {
    match char::from_u32(code) {
        Some(c) => c,
        None => '\u{FFFD}',
    }
}

fn forms(c: char) -> Option<Forms> {
    let forms = match c {
        '\u{0621}' => Forms {
            isolated: '\u{FE80}',
            final_: '\u{FE80}',
            initial: None,
            medial: None,
        },
        '\u{0622}' => right(0xFE81),
        '\u{0623}' => right(0xFE83),
        '\u{0624}' => right(0xFE85),
        '\u{0625}' => right(0xFE87),
        '\u{0626}' => dual(0xFE89),
        '\u{0627}' => right(0xFE8D),
        '\u{0628}' => dual(0xFE8F),
        '\u{0629}' => right(0xFE93),
        '\u{062A}' => dual(0xFE95),
        '\u{062B}' => dual(0xFE99),
        '\u{062C}' => dual(0xFE9D),
        '\u{062D}' => dual(0xFEA1),
        '\u{062E}' => dual(0xFEA5),
        '\u{062F}' => right(0xFEA9),
        '\u{0630}' => right(0xFEAB),
        '\u{0631}' => right(0xFEAD),
        '\u{0632}' => right(0xFEAF),
        '\u{0633}' => dual(0xFEB1),
        '\u{0634}' => dual(0xFEB5),
        '\u{0635}' => dual(0xFEB9),
        '\u{0636}' => dual(0xFEBD),
        '\u{0637}' => dual(0xFEC1),
        '\u{0638}' => dual(0xFEC5),
        '\u{0639}' => dual(0xFEC9),
        '\u{063A}' => dual(0xFECD),
        '\u{0641}' => dual(0xFED1),
        '\u{0642}' => dual(0xFED5),
        '\u{0643}' => dual(0xFED9),
        '\u{0644}' => dual(0xFEDD),
        '\u{0645}' => dual(0xFEE1),
        '\u{0646}' => dual(0xFEE5),
        '\u{0647}' => dual(0xFEE9),
        '\u{0648}' => right(0xFEED),
        '\u{0649}' => Forms {
            isolated: '\u{FEEF}',
            final_: '\u{FEF0}',
            initial: Some('\u{FBE8}'),
            medial: Some('\u{FBE9}'),
        },
        '\u{064A}' => dual(0xFEF1),
        '\u{0671}' => right(0xFB50),
        '\u{067E}' => dual(0xFB56),
        '\u{0686}' => dual(0xFB7A),
        '\u{0698}' => right(0xFB8A),
        '\u{06A9}' => dual(0xFB8E),
        '\u{06AF}' => dual(0xFB92),
        '\u{06C0}' => right(0xFBA4),
        '\u{06CC}' => dual(0xFBFC),
        _ => return None,
    };
    Some(forms)
}

fn joining(c: char) -> Joining {
    match c {
        '\u{0640}' | ZWJ => Joining::Causing,
        '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{06D6}'..='\u{06DC}' | '\u{06DF}'..='\u{06E4}'
        | '\u{06E7}' | '\u{06E8}' | '\u{06EA}'..='\u{06ED}' => Joining::Transparent,
        // Hamza has no connecting forms at all.
        '\u{0621}' => Joining::None,
        _ => match forms(c) {
            Some(f) if f.initial.is_some() => Joining::Dual,
            Some(_) => Joining::Right,
            None => Joining::None,
        },
    }
}

/// Lam-alef ligature (isolated, final) for the alef that follows a lam.
fn lam_alef(alef: char) -> Option<(char, char)> {
    match alef {
        '\u{0622}' => Some(('\u{FEF5}', '\u{FEF6}')),
        '\u{0623}' => Some(('\u{FEF7}', '\u{FEF8}')),
        '\u{0625}' => Some(('\u{FEF9}', '\u{FEFA}')),
        '\u{0627}' => Some(('\u{FEFB}', '\u{FEFC}')),
        _ => None,
    }
}

/// Shapes Arabic and Persian letters into Presentation Forms-A/B.
///
/// Harakat and other transparent marks are skipped when looking for the
/// neighbours of a letter and kept in the output. Characters outside the
/// Arabic letter tables pass through unchanged. Shaping never fails.
///
/// # Example
///
/// ```
/// use chatcloud::render::{ArabicShaper, Shaper};
///
/// let shaped = ArabicShaper.shape("سلام")?;
/// assert_eq!(shaped, "\u{FEB3}\u{FEFC}\u{FEE1}");
/// # Ok::<(), chatcloud::ChatcloudError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ArabicShaper;

impl ArabicShaper {
    pub fn new() -> Self {
        Self
    }

    /// Shapes `text`; infallible version of [`Shaper::shape`].
    pub fn shape_str(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len());
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let Some(forms) = forms(c) else {
                out.push(c);
                i += 1;
                continue;
            };

            let joins_prev = matches!(joining(c), Joining::Dual | Joining::Right)
                && neighbour(&chars[..i], true)
                    .is_some_and(|p| matches!(joining(p), Joining::Dual | Joining::Causing));

            if c == LAM {
                if let Some((isolated, final_)) = chars.get(i + 1).copied().and_then(lam_alef) {
                    out.push(if joins_prev { final_ } else { isolated });
                    i += 2;
                    continue;
                }
            }

            let joins_next = joining(c) == Joining::Dual
                && neighbour(&chars[i + 1..], false).is_some_and(|n| {
                    matches!(joining(n), Joining::Dual | Joining::Right | Joining::Causing)
                });

            let shaped = match (joins_prev, joins_next) {
                (true, true) => forms.medial.unwrap_or(forms.final_),
                (true, false) => forms.final_,
                (false, true) => forms.initial.unwrap_or(forms.isolated),
                (false, false) => forms.isolated,
            };
            out.push(shaped);
            i += 1;
        }

        out
    }
}

/// Nearest non-transparent character before (`backwards`) or after a position.
fn neighbour(chars: &[char], backwards: bool) -> Option<char> {
    let not_transparent = |c: &&char| joining(**c) != Joining::Transparent;
    if backwards {
        chars.iter().rev().find(not_transparent).copied()
    } else {
        chars.iter().find(not_transparent).copied()
    }
}

impl Shaper for ArabicShaper {
    fn shape(&self, text: &str) -> Result<String> {
        Ok(self.shape_str(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(text: &str) -> String {
        ArabicShaper::new().shape_str(text)
    }

    #[test]
    fn test_isolated_letter() {
        assert_eq!(shape("ب"), "\u{FE8F}");
        assert_eq!(shape("ا"), "\u{FE8D}");
    }

    #[test]
    fn test_two_dual_letters() {
        // beh initial + beh final
        assert_eq!(shape("بب"), "\u{FE91}\u{FE90}");
    }

    #[test]
    fn test_medial_form() {
        // beh initial, beh medial, beh final
        assert_eq!(shape("ببب"), "\u{FE91}\u{FE92}\u{FE90}");
    }

    #[test]
    fn test_right_joining_breaks_chain() {
        // dal never joins the next letter: beh initial, dal final, beh isolated
        assert_eq!(shape("بدب"), "\u{FE91}\u{FEAA}\u{FE8F}");
    }

    #[test]
    fn test_persian_letters() {
        // peh initial, gaf medial, farsi yeh final
        assert_eq!(shape("پگی"), "\u{FB58}\u{FB95}\u{FBFD}");
        // keheh isolated
        assert_eq!(shape("ک"), "\u{FB8E}");
        // jeh isolated
        assert_eq!(shape("ژ"), "\u{FB8A}");
    }

    #[test]
    fn test_lam_alef() {
        assert_eq!(shape("لا"), "\u{FEFB}");
        // seen initial, lam-alef final, meem isolated
        assert_eq!(shape("سلام"), "\u{FEB3}\u{FEFC}\u{FEE1}");
    }

    #[test]
    fn test_zwnj_prevents_joining() {
        // meem, yeh | ZWNJ | reh, waw, meem; waw never joins forward
        let shaped = shape("می\u{200C}روم");
        assert_eq!(
            shaped,
            "\u{FEE3}\u{FBFD}\u{200C}\u{FEAD}\u{FEED}\u{FEE1}"
        );
    }

    #[test]
    fn test_transparent_marks_skipped() {
        // beh + fatha + beh: marks don't break the join
        assert_eq!(shape("بَب"), "\u{FE91}\u{064E}\u{FE90}");
    }

    #[test]
    fn test_tatweel_causes_joining() {
        assert_eq!(shape("بـ"), "\u{FE91}\u{0640}");
    }

    #[test]
    fn test_hamza_never_joins() {
        assert_eq!(shape("بء"), "\u{FE8F}\u{FE80}");
    }

    #[test]
    fn test_non_arabic_passthrough() {
        assert_eq!(shape("Rust 2024!"), "Rust 2024!");
        assert_eq!(shape("۱۲"), "۱۲");
        assert_eq!(shape(""), "");
    }

    #[test]
    fn test_spaces_separate_words() {
        assert_eq!(shape("ب ب"), "\u{FE8F} \u{FE8F}");
    }
}
