//! Performance benchmarks for pitch detection

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use overtone_dsp::{detect_pitch, DetectorConfig, PitchDetector};

fn bench_detect_pitch(c: &mut Criterion) {
    // Generate synthetic audio (5 seconds at 44.1kHz)
    let samples: Vec<f32> = (0..44100 * 5)
        .map(|i| (i as f32 * 440.0 * 2.0 * std::f32::consts::PI / 44100.0).sin() * 0.5)
        .collect();

    let config = DetectorConfig::default();

    c.bench_function("detect_pitch_5s", |b| {
        b.iter(|| {
            let _ = detect_pitch(
                black_box(&samples),
                black_box(44100),
                black_box(config.clone()),
            );
        });
    });
}

fn bench_single_hop(c: &mut Criterion) {
    let config = DetectorConfig::default();
    let hop: Vec<f32> = (0..config.hop_size())
        .map(|i| (i as f32 * 440.0 * 2.0 * std::f32::consts::PI / 44100.0).sin() * 0.5)
        .collect();

    let mut detector = PitchDetector::new(44100, config).unwrap();

    c.bench_function("detect_single_hop", |b| {
        b.iter(|| {
            let _ = detector.detect(black_box(&hop));
        });
    });
}

criterion_group!(benches, bench_detect_pitch, bench_single_hop);
criterion_main!(benches);
