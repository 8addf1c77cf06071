//! Benchmarks for the dense codec paths

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use linksim_core::{
    bits, fec, transmit, ErrorControl, FramingScheme, LineCode, LinkConfig, ModScheme,
};

fn bench_crc(c: &mut Criterion) {
    let payload: Vec<u8> = (0..2048).map(|i| ((i * 7) % 3 == 0) as u8).collect();

    c.bench_function("crc_protect_2k_bits", |b| {
        b.iter(|| fec::protect(black_box(&payload), ErrorControl::Crc))
    });

    let body = fec::protect(&payload, ErrorControl::Crc);
    c.bench_function("crc_check_2k_bits", |b| {
        b.iter(|| fec::check(black_box(&body), ErrorControl::Crc).unwrap())
    });
}

fn bench_hamming(c: &mut Criterion) {
    let payload: Vec<u8> = (0..2048).map(|i| (i % 5 == 0) as u8).collect();

    c.bench_function("hamming_protect_2k_bits", |b| {
        b.iter(|| fec::protect(black_box(&payload), ErrorControl::Hamming))
    });

    let body = fec::protect(&payload, ErrorControl::Hamming);
    c.bench_function("hamming_check_2k_bits", |b| {
        b.iter(|| fec::check(black_box(&body), ErrorControl::Hamming).unwrap())
    });
}

fn bench_transmit(c: &mut Criterion) {
    let config = LinkConfig::new(
        LineCode::Manchester,
        FramingScheme::CharacterCount,
        ErrorControl::Crc,
        ModScheme::Ask,
    );
    let text = "the quick brown fox jumps over the lazy dog";

    c.bench_function("transmit_sentence", |b| {
        b.iter(|| transmit(black_box(text), &config).unwrap())
    });

    let wire = transmit(text, &config).unwrap().wire;
    c.bench_function("wire_string_parse", |b| {
        b.iter(|| bits::from_wire_string(black_box(&wire)).unwrap())
    });
}

criterion_group!(benches, bench_crc, bench_hamming, bench_transmit);
criterion_main!(benches);
