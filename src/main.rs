//! # chatcloud CLI
//!
//! Command-line interface for the chatcloud library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatcloud::cli::Args;
use chatcloud::{ChatStatistics, ChatcloudError};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chatcloud=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatcloudError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    let config = args.cloud_config();

    // Print header
    println!("☁️  chatcloud v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:     {}", args.input.display());
    match &args.stopwords {
        Some(path) => println!("🚫 Stopwords: {}", path.display()),
        None => println!("🚫 Stopwords: bundled"),
    }
    println!("💾 Output:    {}", args.output.display());
    match &config.font_path {
        Some(path) => println!("🔤 Font:      {}", path.display()),
        None => println!("🔤 Font:      bundled (DejaVu Sans)"),
    }
    println!("📐 Size:      {}x{}", config.width, config.height);
    if let Some(seed) = config.seed {
        println!("🎲 Seed:      {}", seed);
    }
    println!();

    // Step 1: Load
    println!("⏳ Loading chat export...");
    let load_start = Instant::now();
    let stats = match &args.stopwords {
        Some(path) => ChatStatistics::from_paths(&args.input, path)?,
        None => ChatStatistics::from_path(&args.input)?,
    };
    println!(
        "   Found {} messages, {} with plain text ({:.2}s)",
        stats.document().len(),
        stats.document().plain_count(),
        load_start.elapsed().as_secs_f64()
    );
    println!("   {} stop-words", stats.stop_words().len());

    // Step 2: Render and write
    println!("🎨 Rendering word cloud...");
    let render_start = Instant::now();
    let path = stats.generate_word_cloud(&args.output, &config)?;
    println!("   Rendered in {:.2}s", render_start.elapsed().as_secs_f64());

    println!();
    println!("✅ Done! Word cloud saved to {}", path.display());

    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
