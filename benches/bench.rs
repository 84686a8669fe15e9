//! Criterion benchmarks for Sigap preprocessing and rules.
//!
//! Covers the deterministic stages that run for every survey answer:
//! - Normalization
//! - Typo correction
//! - Keyword rules

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use sigap::analysis::normalizer::TextNormalizer;
use sigap::sentiment::RuleEngine;
use sigap::spelling::corrector::{DEFAULT_TYPO_THRESHOLD, TypoCorrector};
use sigap::util::similarity::partial_ratio;
use sigap::vocabulary::Vocabulary;

/// Generate survey-like answers for benchmarking.
fn generate_answers(count: usize) -> Vec<String> {
    let words = [
        "Sapi", "saya", "matiii", "kemarin!!", "ayam", "lemes", "tidak", "mau", "makan",
        "kambing", "sehat", "hari", "ini", "panas", "tolooong", "domba", "kurusss", "demam",
        "peternakan", "aman", "bebek", "sakt", "menggigil,", "itik",
    ];

    let mut answers = Vec::with_capacity(count);
    for i in 0..count {
        let length = 3 + (i % 10);
        let answer: Vec<&str> = (0..length)
            .map(|j| words[(i * 7 + j * 13) % words.len()]) // Pseudo-random distribution
            .collect();
        answers.push(answer.join(" "));
    }
    answers
}

/// Benchmark normalization.
fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");

    let normalizer = TextNormalizer::new().unwrap();
    let answers = generate_answers(1000);

    group.bench_function("normalize_single_answer", |b| {
        b.iter(|| black_box(normalizer.normalize(black_box(&answers[0]))))
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("normalize_batch_answers", |b| {
        b.iter(|| {
            for answer in answers.iter().take(100) {
                black_box(normalizer.normalize(black_box(answer)));
            }
        })
    });

    group.finish();
}

/// Benchmark typo correction against the default vocabulary.
fn bench_typo_correction(c: &mut Criterion) {
    let mut group = c.benchmark_group("typo_correction");
    group.sample_size(20);

    let corrector = TypoCorrector::from_vocabulary(&Vocabulary::default(), DEFAULT_TYPO_THRESHOLD);
    let normalizer = TextNormalizer::new().unwrap();
    let answers: Vec<String> = generate_answers(100)
        .iter()
        .map(|a| normalizer.normalize(a))
        .collect();

    group.bench_function("partial_ratio", |b| {
        b.iter(|| black_box(partial_ratio(black_box("menggigl"), black_box("menggigil"))))
    });

    group.throughput(Throughput::Elements(answers.len() as u64));
    group.bench_function("correct_batch_answers", |b| {
        b.iter(|| {
            for answer in &answers {
                black_box(corrector.correct(black_box(answer)));
            }
        })
    });

    group.finish();
}

/// Benchmark the keyword rules on corrected text.
fn bench_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("rules");

    let engine = RuleEngine::new(&Vocabulary::default()).unwrap();
    let answers = generate_answers(1000);

    group.throughput(Throughput::Elements(answers.len() as u64));
    group.bench_function("classify_batch_answers", |b| {
        b.iter(|| {
            for answer in &answers {
                black_box(engine.classify(black_box(answer)));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_normalization, bench_rules);

// Separate group for slower benchmarks
criterion_group!(slow_benches, bench_typo_correction);

criterion_main!(benches, slow_benches);
