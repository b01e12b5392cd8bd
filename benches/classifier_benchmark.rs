use centavo::classifier::utils::{argmax, softmax};
use centavo::Category;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tokenizers::Tokenizer;

fn fixture_tokenizer() -> Tokenizer {
    Tokenizer::from_bytes(include_str!("../testdata/tokenizer.json").as_bytes())
        .expect("fixture tokenizer should parse")
}

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scoring");

    // Configure sampling
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    let logits = [1.2f32, -0.4, 3.1, 0.0, -2.2, 0.7, 1.9, -1.3];

    group.bench_function("softmax_argmax", |b| {
        b.iter(|| {
            let probabilities = softmax(black_box(&logits));
            argmax(&probabilities).unwrap()
        })
    });

    group.bench_function("category_lookup", |b| {
        b.iter(|| Category::from_index(black_box(2)).unwrap())
    });

    group.finish();
}

fn bench_tokenization(c: &mut Criterion) {
    let tokenizer = fixture_tokenizer();
    let mut group = c.benchmark_group("Tokenization");

    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    // Short text (< 10 tokens)
    group.bench_function("short_text", |b| {
        b.iter(|| {
            tokenizer
                .encode(black_box("upi payment to grocery store"), true)
                .unwrap()
                .get_ids()
                .len()
        })
    });

    // Long text (hundreds of tokens)
    let long_text = "monthly emi payment for home loan transfer from account ".repeat(30);
    group.bench_function("long_text", |b| {
        b.iter(|| {
            tokenizer
                .encode(black_box(long_text.as_str()), true)
                .unwrap()
                .get_ids()
                .len()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_scoring, bench_tokenization);
criterion_main!(benches);
