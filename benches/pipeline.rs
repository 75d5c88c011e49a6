//! Benchmarks for the chatcloud text pipeline.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench pipeline -- normalize`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatcloud::ChatDocument;
use chatcloud::config::TextPolicy;
use chatcloud::core::{Normalizer, StopWordSet, WordTokenizer, aggregate_text};
use chatcloud::render::{ArabicShaper, BidiReorder, UnicodeBidiReorder, word_frequencies};

const SENTENCES: &[&str] = &[
    "سلام دوستان امروز كتاب ها را مي خوانم",
    "فردا جلسه ساعت 10 برگزار مي شود ؟",
    "ممنون از همه ، خيلي خوب بود",
    "این پروژه بزرگ تر از قبلی است",
];

// =============================================================================
// Test Data Generators
// =============================================================================

fn generate_telegram_json(count: usize) -> String {
    let mut messages = Vec::with_capacity(count);
    for i in 0..count {
        let sender = if i % 2 == 0 { "Sara" } else { "Ali" };
        messages.push(format!(
            r#"{{"id": {}, "type": "message", "from": "{}", "text": "{}"}}"#,
            i,
            sender,
            SENTENCES[i % SENTENCES.len()]
        ));
    }
    format!(
        r#"{{"name": "گروه", "type": "private_group", "messages": [{}]}}"#,
        messages.join(",\n")
    )
}

fn generate_text(count: usize) -> String {
    (0..count)
        .map(|i| SENTENCES[i % SENTENCES.len()])
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Loading and Aggregation
// =============================================================================

fn bench_document_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_parsing");

    for size in [100_usize, 1_000, 10_000] {
        let json = generate_telegram_json(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &json, |b, json| {
            b.iter(|| {
                let doc: ChatDocument = black_box(json).parse().unwrap();
                black_box(doc)
            });
        });
    }
    group.finish();
}

fn bench_aggregate_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_text");
    let stop_words = StopWordSet::bundled(&Normalizer::new());

    for size in [100_usize, 1_000, 10_000] {
        let doc: ChatDocument = generate_telegram_json(size).parse().unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| {
                let text = aggregate_text(
                    black_box(doc.messages()),
                    &WordTokenizer,
                    &stop_words,
                    TextPolicy::PlainOnly,
                );
                black_box(text)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Text Preparation
// =============================================================================

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let normalizer = Normalizer::new();

    for size in [100_usize, 1_000, 10_000] {
        let text = generate_text(size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(normalizer.normalize(black_box(text))));
        });
    }
    group.finish();
}

fn bench_shape_and_reorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("shape_and_reorder");
    let bidi = UnicodeBidiReorder::default();

    for size in [100_usize, 1_000, 10_000] {
        let text = Normalizer::new().normalize(&generate_text(size));
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                let shaped = ArabicShaper.shape_str(black_box(text));
                black_box(bidi.reorder(&shaped).unwrap())
            });
        });
    }
    group.finish();
}

fn bench_word_frequencies(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_frequencies");

    for size in [100_usize, 1_000, 10_000] {
        let text = generate_text(size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(word_frequencies(black_box(text), 200)));
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_document_parsing,
    bench_aggregate_text,
    bench_normalize,
    bench_shape_and_reorder,
    bench_word_frequencies,
);

criterion_main!(benches);
