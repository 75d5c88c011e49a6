//! End-to-end CLI tests for chatcloud.
//!
//! These tests run the actual binary with various arguments and check the
//! output and exit status.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    let telegram = r#"{
  "name": "گروه",
  "type": "private_group",
  "messages": [
    {"id": 1, "type": "message", "from": "Sara", "text": "سلام سلام دنیا"},
    {"id": 2, "type": "message", "from": "Ali", "text": "کتاب ها را می خوانم"},
    {"id": 3, "type": "message", "from": "Sara", "text": ["لینک ", {"type": "link", "text": "https://t.me"}]}
  ]
}"#;
    fs::write(dir.path().join("chat.json"), telegram).unwrap();
    fs::write(dir.path().join("empty.json"), r#"{"messages": []}"#).unwrap();
    fs::write(dir.path().join("no_messages.json"), "{}").unwrap();
    fs::write(dir.path().join("broken.json"), "{\"messages\": [").unwrap();
    fs::write(dir.path().join("stop.txt"), "را\nها\n").unwrap();

    dir
}

fn chatcloud_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_chatcloud"));
    Command::from_std(cmd)
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ============================================================================
// Rendering
// ============================================================================

mod rendering {
    use super::*;

    #[test]
    fn test_generates_wordcloud() {
        let fixtures = setup_fixtures();
        let out = tempdir().unwrap();

        chatcloud_cmd()
            .args([
                path_str(&fixtures.path().join("chat.json")),
                "-o",
                path_str(out.path()),
                "--width",
                "320",
                "--height",
                "240",
                "--max-font-size",
                "80",
                "--seed",
                "1",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Done"))
            .stdout(predicate::str::contains("3 messages"))
            .stdout(predicate::str::contains("wordcloud.png"));

        let bytes = fs::read(out.path().join("wordcloud.png")).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_default_run_uses_bundled_font() {
        let fixtures = setup_fixtures();
        let out = tempdir().unwrap();

        chatcloud_cmd()
            .args([path_str(&fixtures.path().join("chat.json")), "-o", path_str(out.path())])
            .assert()
            .success()
            .stdout(predicate::str::contains("bundled (DejaVu Sans)"))
            .stdout(predicate::str::contains("Done"));

        let image = image::open(out.path().join("wordcloud.png")).unwrap();
        assert_eq!((image.width(), image.height()), (800, 600));
    }

    #[test]
    fn test_english_stopwords_flag() {
        let fixtures = setup_fixtures();
        let out = tempdir().unwrap();
        let chat = fixtures.path().join("english.json");
        fs::write(&chat, r#"{"messages": [{"text": "the the the cloud"}]}"#).unwrap();

        chatcloud_cmd()
            .args([
                path_str(&chat),
                "-o",
                path_str(out.path()),
                "--english-stopwords",
                "--width",
                "200",
                "--height",
                "100",
            ])
            .assert()
            .success();

        assert!(out.path().join("wordcloud.png").exists());
    }

    #[test]
    fn test_custom_stopwords_and_rich_text() {
        let fixtures = setup_fixtures();
        let out = tempdir().unwrap();

        chatcloud_cmd()
            .args([
                path_str(&fixtures.path().join("chat.json")),
                "-s",
                path_str(&fixtures.path().join("stop.txt")),
                "-o",
                path_str(out.path()),
                "--rich-text",
                "--max-words",
                "10",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("2 stop-words"));

        assert!(out.path().join("wordcloud.png").exists());
    }

    #[test]
    fn test_empty_export_still_renders() {
        let fixtures = setup_fixtures();
        let out = tempdir().unwrap();

        chatcloud_cmd()
            .args([
                path_str(&fixtures.path().join("empty.json")),
                "-o",
                path_str(out.path()),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("0 messages"));

        assert!(out.path().join("wordcloud.png").exists());
    }
}

// ============================================================================
// Error Handling
// ============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn test_missing_input_file() {
        let out = tempdir().unwrap();
        chatcloud_cmd()
            .args(["/no/such/chat.json", "-o", path_str(out.path())])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Error"));

        assert!(!out.path().join("wordcloud.png").exists());
    }

    #[test]
    fn test_missing_messages_field() {
        let fixtures = setup_fixtures();
        let out = tempdir().unwrap();
        chatcloud_cmd()
            .args([
                path_str(&fixtures.path().join("no_messages.json")),
                "-o",
                path_str(out.path()),
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("messages"));

        assert!(!out.path().join("wordcloud.png").exists());
    }

    #[test]
    fn test_broken_json() {
        let fixtures = setup_fixtures();
        chatcloud_cmd()
            .args([path_str(&fixtures.path().join("broken.json"))])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Telegram JSON"));
    }

    #[test]
    fn test_missing_stopwords_file() {
        let fixtures = setup_fixtures();
        chatcloud_cmd()
            .args([
                path_str(&fixtures.path().join("chat.json")),
                "-s",
                "/no/such/stop.txt",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("stop.txt"));
    }

    #[test]
    fn test_missing_font() {
        let fixtures = setup_fixtures();
        let out = tempdir().unwrap();
        chatcloud_cmd()
            .args([
                path_str(&fixtures.path().join("chat.json")),
                "-o",
                path_str(out.path()),
                "--font",
                "/no/such/font.ttf",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("font"));

        assert!(!out.path().join("wordcloud.png").exists());
    }

    #[test]
    fn test_oversized_canvas_rejected() {
        let fixtures = setup_fixtures();
        let out = tempdir().unwrap();
        chatcloud_cmd()
            .args([
                path_str(&fixtures.path().join("chat.json")),
                "-o",
                path_str(out.path()),
                "--width",
                "100000",
                "--height",
                "100000",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"))
            .stderr(predicate::str::contains("100000x100000"));

        assert!(!out.path().join("wordcloud.png").exists());
    }

    #[test]
    fn test_zero_width_rejected() {
        let fixtures = setup_fixtures();
        chatcloud_cmd()
            .args([path_str(&fixtures.path().join("chat.json")), "--width", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn test_no_arguments() {
        chatcloud_cmd().assert().failure();
    }
}

// ============================================================================
// Help and Version
// ============================================================================

mod help_and_version {
    use super::*;

    #[test]
    fn test_help() {
        chatcloud_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("word cloud"))
            .stdout(predicate::str::contains("--stopwords"))
            .stdout(predicate::str::contains("--max-font-size"))
            .stdout(predicate::str::contains("EXAMPLES"));
    }

    #[test]
    fn test_version() {
        chatcloud_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}
