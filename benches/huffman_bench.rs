use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use huffcode::{CodeTable, CodeTree, Decoder, Encoder, FrequencyTable};

fn sample(len: usize) -> Vec<u8> {
    // Skewed distribution: low values dominate.
    (0..len)
        .map(|i| {
            let x = (i as u64).wrapping_mul(2654435761) % 1000;
            (x as f64).sqrt() as u8
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let input = sample(100_000);
    let freqs = FrequencyTable::from_symbols(input.iter().copied());

    group.bench_function("frequencies", |b| {
        b.iter(|| FrequencyTable::from_symbols(input.iter().copied()))
    });
    group.bench_function("tree", |b| b.iter(|| CodeTree::from_frequencies(&freqs).unwrap()));

    let tree = CodeTree::from_frequencies(&freqs).unwrap();
    group.bench_function("table", |b| b.iter(|| CodeTable::from_tree(&tree).unwrap()));
    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    for len in [1_000usize, 100_000] {
        let input = sample(len);
        let freqs = FrequencyTable::from_symbols(input.iter().copied());
        let encoder = Encoder::from_frequencies(&freqs).unwrap();
        let bits = encoder.encode(&input).unwrap();
        let decoder = Decoder::from_table(encoder.table()).unwrap();

        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("encode", len), &input, |b, input| {
            b.iter(|| encoder.encode(input).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("decode", len), &bits, |b, bits| {
            b.iter(|| decoder.decode(bits).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_codec);
criterion_main!(benches);
