use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

/// A synthetic corpus with enough repetition to exercise back-references and
/// enough variety to exercise both Huffman trees.
fn sample_corpus() -> Vec<u8> {
    let paragraph = b"the quick brown fox jumps over the lazy dog. ".repeat(400);
    paragraph
}

fn criterion_benchmark(c: &mut Criterion) {
    let corpus = sample_corpus();
    let compressed = deflate::encode(&corpus).expect("sample corpus encodes");

    c.bench_with_input(
        BenchmarkId::new("deflate encode", "sample_corpus"),
        &corpus,
        |b, data| b.iter(|| deflate::encode(data)),
    );

    c.bench_with_input(
        BenchmarkId::new("deflate decode", "sample_corpus"),
        &compressed,
        |b, data| b.iter(|| deflate::decode(data)),
    );
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
