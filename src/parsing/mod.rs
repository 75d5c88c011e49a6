//! Chat export parsing.
//!
//! Only Telegram Desktop JSON exports are supported.

pub mod telegram;

pub use telegram::{extract_telegram_text, parse_telegram_export};
