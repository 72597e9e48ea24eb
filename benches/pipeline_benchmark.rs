//! Benchmarks for kocorpus pipeline performance.
//!
//! Run with: cargo bench
//!
//! Transcripts are generated from a fixed seed so runs are comparable.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kocorpus::{ExclusionRole, ExclusionSet, Exclusions, LexiconAnalyzer, Pipeline, PipelineOptions};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

const NOUNS: &[&str] = &["오늘", "날씨", "친구", "공원", "학교", "음식", "영화", "시간", "회사", "여행"];
const PARTICLES: &[&str] = &["가", "를", "에서", "랑", "는", "도", ""];
const VERBS: &[(&str, &str)] = &[("만났", "만나다"), ("먹었", "먹다"), ("봤", "보다"), ("좋았", "좋다")];
const ENDINGS: &[&str] = &["어요.", "어.", "다!", "니?"];
const CONNECTIVES: &[&str] = &["그래서", "그런데", "그리고", "하지만", "근데"];

fn analyzer() -> LexiconAnalyzer {
    let mut analyzer = LexiconAnalyzer::new();
    for noun in NOUNS {
        analyzer.insert(noun, "NNG", None);
    }
    for (surface, lemma) in VERBS {
        analyzer.insert(surface, "VV", Some(lemma));
    }
    analyzer
}

/// Creates a synthetic transcript with the given number of sentences.
fn create_transcript(sentence_count: usize, rng: &mut StdRng) -> String {
    let mut transcript = String::new();
    for i in 0..sentence_count {
        if i > 0 {
            transcript.push(' ');
            if rng.gen_bool(0.2) {
                transcript.push_str(CONNECTIVES.choose(rng).unwrap_or(&"그리고"));
                transcript.push(' ');
            }
        }
        for _ in 0..rng.gen_range(2..5) {
            transcript.push_str(NOUNS.choose(rng).unwrap_or(&"오늘"));
            transcript.push_str(PARTICLES.choose(rng).unwrap_or(&""));
            transcript.push(' ');
        }
        let (verb, _) = VERBS.choose(rng).unwrap_or(&("봤", "보다"));
        transcript.push_str(verb);
        transcript.push_str(ENDINGS.choose(rng).unwrap_or(&"어."));
    }
    transcript
}

fn pipeline() -> Pipeline {
    let exclusions = Exclusions::empty()
        .with(ExclusionRole::Stopword, ExclusionSet::from_entries(["시간"]))
        .with(ExclusionRole::CommonName, ExclusionSet::from_entries(["민수", "지영"]));
    Pipeline::new(Arc::new(exclusions), Arc::new(analyzer()))
}

/// Benchmark a single run at various transcript sizes.
fn bench_pipeline_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_run");
    let mut rng = StdRng::seed_from_u64(42);
    let pipeline = pipeline();

    for sentence_count in [10, 100, 1000].iter() {
        let transcript = create_transcript(*sentence_count, &mut rng);

        group.throughput(Throughput::Bytes(transcript.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("sentences", sentence_count),
            &transcript,
            |b, transcript| {
                b.iter(|| pipeline.run(black_box(transcript)));
            },
        );
    }

    group.finish();
}

/// Benchmark batch runs, parallel against sequential.
fn bench_run_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_batch");
    let mut rng = StdRng::seed_from_u64(7);
    let transcripts: Vec<String> = (0..32).map(|_| create_transcript(100, &mut rng)).collect();

    let parallel = pipeline();
    let sequential = pipeline().with_options(PipelineOptions::default().sequential());

    group.bench_function("parallel", |b| {
        b.iter(|| parallel.run_batch(black_box(&transcripts)));
    });
    group.bench_function("sequential", |b| {
        b.iter(|| sequential.run_batch(black_box(&transcripts)));
    });

    group.finish();
}

/// Benchmark the text stages on their own.
fn bench_text_stages(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let transcript = create_transcript(200, &mut rng);
    let hanja = "大韓民國 國民 漢字 敎育 歷史 文化 ".repeat(50);

    c.bench_function("segment", |b| {
        b.iter(|| kocorpus::segment(black_box(&transcript)));
    });

    c.bench_function("normalize_hanja", |b| {
        b.iter(|| kocorpus::normalize(black_box(&hanja)));
    });
}

criterion_group!(benches, bench_text_stages, bench_pipeline_run, bench_run_batch);
criterion_main!(benches);
