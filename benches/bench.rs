use criterion::{criterion_group, criterion_main, Criterion};
use std::fmt::Write;
use std::hint::black_box;

fn sine_text(samples: usize) -> String {
    let mut text = String::new();
    for i in 0..samples {
        let value = (i as f32 * 2.0 * std::f32::consts::PI / samples as f32).sin();
        writeln!(text, "{value}").unwrap();
    }
    text
}

fn bench_encode(c: &mut Criterion) {
    let text = sine_text(csv2arb::NUM_SAMPLES);
    c.bench_function("encode full file", |b| {
        b.iter(|| csv2arb::encode(black_box(&text)).unwrap())
    });
}

fn bench_decode(c: &mut Criterion) {
    let bytes = csv2arb::encode(&sine_text(1000)).unwrap().to_bytes();
    c.bench_function("decode to text", |b| {
        b.iter(|| csv2arb::decode(black_box(&bytes)).unwrap().to_text())
    });
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
