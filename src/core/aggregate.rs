//! Builds the single text blob that is fed to the renderer.
//!
//! Each qualifying message contributes one leading space followed by its
//! surviving tokens joined with single spaces. Tokens are compared with the
//! stop-word set exactly as the tokenizer yields them; normalization of the
//! whole aggregate happens later, in the render stage.

use serde_json::Value;

use super::stopwords::StopWordSet;
use super::tokenizer::Tokenizer;
use crate::config::TextPolicy;
use crate::message::{Message, MessageText};
use crate::parsing::extract_telegram_text;

/// Appends the filtered tokens of one message text to `acc`.
///
/// A text whose tokens are all stop-words still appends the leading space.
///
/// # Example
///
/// ```
/// use chatcloud::core::{StopWordSet, WordTokenizer, append_message};
///
/// let stop_words: StopWordSet = ["و"].into_iter().collect();
/// let mut acc = String::new();
/// append_message(&mut acc, "نان و پنیر", &WordTokenizer, &stop_words);
/// append_message(&mut acc, "و", &WordTokenizer, &stop_words);
/// assert_eq!(acc, " نان پنیر ");
/// ```
pub fn append_message(
    acc: &mut String,
    text: &str,
    tokenizer: &dyn Tokenizer,
    stop_words: &StopWordSet,
) {
    acc.push(' ');
    let mut first = true;
    for token in tokenizer.tokenize(text) {
        if stop_words.contains(token) {
            continue;
        }
        if !first {
            acc.push(' ');
        }
        acc.push_str(token);
        first = false;
    }
}

/// Returns the text a message contributes under `policy`, if any.
fn message_text(message: &Message, policy: TextPolicy) -> Option<std::borrow::Cow<'_, str>> {
    match (&message.text, policy) {
        (MessageText::Plain(text), _) => Some(text.as_str().into()),
        (MessageText::Rich(value @ Value::Array(_)), TextPolicy::IncludeRich) => {
            Some(extract_telegram_text(value).into())
        }
        (MessageText::Rich(_), _) => None,
    }
}

/// Concatenates the filtered tokens of every qualifying message in order.
///
/// With [`TextPolicy::PlainOnly`] messages whose `text` is not a string are
/// skipped. [`TextPolicy::IncludeRich`] also flattens rich-text arrays.
pub fn aggregate_text(
    messages: &[Message],
    tokenizer: &dyn Tokenizer,
    stop_words: &StopWordSet,
    policy: TextPolicy,
) -> String {
    let mut acc = String::new();
    for message in messages {
        if let Some(text) = message_text(message, policy) {
            append_message(&mut acc, &text, tokenizer, stop_words);
        }
    }
    acc
}
