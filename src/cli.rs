//! Command-line interface definition using clap.
//!
//! [`Args`] maps one-to-one onto [`CloudConfig`], so the binary stays a thin
//! wrapper around [`ChatStatistics`](crate::ChatStatistics).
//!
//! ```rust
//! use clap::Parser;
//! use chatcloud::cli::Args;
//!
//! let args = Args::parse_from(["chatcloud", "result.json", "--width", "1024", "--seed", "7"]);
//! let config = args.cloud_config();
//! assert_eq!(config.width, 1024);
//! assert_eq!(config.seed, Some(7));
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::config::{CloudConfig, TextPolicy};

/// Generate a word cloud from a Persian Telegram chat export.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatcloud")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatcloud result.json
    chatcloud result.json -s data/stopwords.txt -o out/
    chatcloud result.json --font fonts/Vazirmatn.ttf --width 1200 --height 900
    chatcloud result.json --seed 42 --max-words 100 --rich-text --english-stopwords")]
pub struct Args {
    /// Path to the Telegram JSON export
    pub input: PathBuf,

    /// Stop-word file, one word per line (default: bundled Persian list)
    #[arg(short, long, value_name = "FILE")]
    pub stopwords: Option<PathBuf>,

    /// Directory that receives wordcloud.png
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Font size of the most frequent word
    #[arg(long, default_value_t = 250)]
    pub max_font_size: u32,

    /// Font able to render Arabic script (default: bundled DejaVu Sans)
    #[arg(long, value_name = "FILE")]
    pub font: Option<PathBuf>,

    /// Seed for reproducible layout and colors
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum number of words in the cloud
    #[arg(long, default_value_t = 200)]
    pub max_words: usize,

    /// Also count words in formatted (rich-text) messages
    #[arg(long)]
    pub rich_text: bool,

    /// Drop common English words as well
    #[arg(long)]
    pub english_stopwords: bool,
}

impl Args {
    /// Builds the renderer configuration from the parsed flags.
    pub fn cloud_config(&self) -> CloudConfig {
        let policy = if self.rich_text {
            TextPolicy::IncludeRich
        } else {
            TextPolicy::PlainOnly
        };
        let mut config = CloudConfig::new()
            .with_size(self.width, self.height)
            .with_max_font_size(self.max_font_size)
            .with_max_words(self.max_words)
            .with_text_policy(policy)
            .with_english_stopwords(self.english_stopwords);
        if let Some(font) = &self.font {
            config = config.with_font_path(font);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cloud_config() {
        let args = Args::parse_from(["chatcloud", "chat.json"]);
        let config = args.cloud_config();
        assert_eq!(config, CloudConfig::default());
        assert_eq!(args.output, PathBuf::from("."));
        assert!(args.stopwords.is_none());
        assert!(args.font.is_none());
    }

    #[test]
    fn test_all_flags() {
        let args = Args::parse_from([
            "chatcloud",
            "chat.json",
            "-s",
            "stop.txt",
            "-o",
            "out",
            "--width",
            "300",
            "--height",
            "200",
            "--max-font-size",
            "90",
            "--font",
            "f.ttf",
            "--seed",
            "5",
            "--max-words",
            "20",
            "--rich-text",
            "--english-stopwords",
        ]);
        assert_eq!(args.stopwords, Some(PathBuf::from("stop.txt")));
        assert_eq!(args.output, PathBuf::from("out"));

        let config = args.cloud_config();
        assert_eq!((config.width, config.height), (300, 200));
        assert_eq!(config.max_font_size, 90);
        assert_eq!(config.font_path, Some(PathBuf::from("f.ttf")));
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.max_words, 20);
        assert_eq!(config.text_policy, TextPolicy::IncludeRich);
        assert!(config.english_stopwords);
    }

    #[test]
    fn test_input_required() {
        assert!(Args::try_parse_from(["chatcloud"]).is_err());
    }

    #[test]
    fn test_rejects_negative_width() {
        assert!(Args::try_parse_from(["chatcloud", "a.json", "--width", "-5"]).is_err());
    }
}
