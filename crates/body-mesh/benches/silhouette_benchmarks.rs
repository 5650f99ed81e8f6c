//! Benchmarks for silhouette generation.
//!
//! Run with: cargo bench -p body-mesh
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p body-mesh -- --save-baseline main
//! 2. After changes: cargo bench -p body-mesh -- --baseline main

use body_measure::{MeasurementRecord, RawRatioEstimate, UserBiometrics, measure};
use body_mesh::{
    BodyProfile, SilhouetteParams, circumference_at_height, generate_silhouette_with_params,
    lathe::lathe, to_obj_string,
};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn record() -> MeasurementRecord {
    let raw = RawRatioEstimate {
        waist_ratio: 0.165,
        hip_ratio: 0.195,
        shoulder_ratio: 0.245,
        chest_ratio: 0.18,
        torso_height_ratio: 0.3,
        confidence: 0.9,
    };
    measure(&raw, &UserBiometrics::new(172.0, 68.0).with_age(45.0)).unwrap()
}

// =============================================================================
// Generation
// =============================================================================

fn bench_generation(c: &mut Criterion) {
    let record = record();
    let mut group = c.benchmark_group("generate_silhouette");

    for (name, params) in [
        ("preview", SilhouetteParams::preview()),
        ("default", SilhouetteParams::default()),
        ("high_detail", SilhouetteParams::high_detail()),
    ] {
        let vertices = params.profile_samples * params.radial_segments;
        group.throughput(Throughput::Elements(vertices as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &params, |b, params| {
            b.iter(|| generate_silhouette_with_params(black_box(&record), params).unwrap())
        });
    }

    group.finish();
}

fn bench_lathe(c: &mut Criterion) {
    let profile = BodyProfile::from_record(&record(), 48).unwrap();
    let points = profile.radius_height_pairs();
    let mut group = c.benchmark_group("lathe");

    for segments in [32usize, 64, 128] {
        group.bench_with_input(
            BenchmarkId::from_parameter(segments),
            &segments,
            |b, &segments| b.iter(|| lathe(black_box(&points), segments).unwrap()),
        );
    }

    group.finish();
}

// =============================================================================
// Measurement and export
// =============================================================================

fn bench_measure_and_export(c: &mut Criterion) {
    let silhouette =
        generate_silhouette_with_params(&record(), &SilhouetteParams::default()).unwrap();

    c.bench_function("circumference_at_height", |b| {
        b.iter(|| circumference_at_height(silhouette.mesh(), black_box(0.0)))
    });
    c.bench_function("to_obj_string", |b| {
        b.iter(|| to_obj_string(black_box(silhouette.mesh())))
    });
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_generation, bench_lathe, bench_measure_and_export);

criterion_main!(benches);
