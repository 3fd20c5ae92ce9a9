// ABOUTME: Criterion benchmarks for closed-form and fitted-model running predictions
// ABOUTME: Measures VDOT, Daniels/Riegel prediction, race time tables and zone interpolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! Criterion benchmarks for the prediction engines.
//!
//! Closed-form benches need nothing on disk. Fitted-model benches load the
//! bundled `data/models.json` once and reuse it across iterations.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]
#![allow(clippy::expect_used)]

use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use runcalc_intelligence::fitted::FittedModelEngine;
use runcalc_intelligence::{riegel, DanielsModel, ModelManager, ModelTable, ValidationLimits};

/// (label, distance meters, time seconds) for a recreational runner
const PERFORMANCES: [(&str, f64, f64); 4] = [
    ("1500m", 1500.0, 390.0),
    ("5k", 5000.0, 1500.0),
    ("10k", 10_000.0, 3100.0),
    ("marathon", 42_195.0, 14_400.0),
];

fn load_manager() -> ModelManager {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("models.json");
    ModelManager::from_table(ModelTable::load(&path).expect("bundled model table loads"))
}

fn bench_closed_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("closed_form");

    group.bench_function("vdot_5k", |b| {
        b.iter(|| DanielsModel::estimate_capacity(black_box(5000.0), black_box(1500.0)));
    });

    group.bench_function("training_paces", |b| {
        b.iter(|| DanielsModel::training_paces(black_box(50.0)));
    });

    for (label, distance, time) in PERFORMANCES {
        group.bench_with_input(
            BenchmarkId::new("daniels_to_marathon", label),
            &(distance, time),
            |b, &(distance, time)| {
                b.iter(|| DanielsModel::predict_time(distance, time, black_box(42_195.0)));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("riegel_to_marathon", label),
            &(distance, time),
            |b, &(distance, time)| {
                b.iter(|| riegel::predict_time(distance, time, black_box(42_195.0)));
            },
        );
    }

    group.finish();
}

fn bench_fitted_models(c: &mut Criterion) {
    let manager = load_manager();
    let engine = FittedModelEngine::new(&manager, ValidationLimits::default());
    let mut group = c.benchmark_group("fitted_models");

    group.throughput(Throughput::Elements(PERFORMANCES.len() as u64));
    group.bench_function("velocity_markers_all_performances", |b| {
        b.iter(|| {
            for (_, distance, time) in PERFORMANCES {
                let _ = black_box(engine.velocity_markers(distance, time));
            }
        });
    });

    for (label, distance, time) in PERFORMANCES {
        group.bench_with_input(
            BenchmarkId::new("race_times", label),
            &(distance, time),
            |b, &(distance, time)| {
                b.iter(|| engine.predict_all_race_times(black_box(distance), black_box(time)));
            },
        );
    }

    group.finish();
}

fn bench_training_zones(c: &mut Criterion) {
    let manager = load_manager();
    let engine = FittedModelEngine::new(&manager, ValidationLimits::default());
    let mut group = c.benchmark_group("training_zones");
    group.sample_size(50);

    // 7.5k sits between reference distances, so every zone interpolates
    group.bench_function("tree_interpolated", |b| {
        b.iter(|| engine.compute_training_paces(black_box(7500.0), black_box(2300.0)));
    });
    group.bench_function("tree_exact_reference", |b| {
        b.iter(|| engine.compute_training_paces(black_box(5000.0), black_box(1500.0)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_closed_form,
    bench_fitted_models,
    bench_training_zones
);
criterion_main!(benches);
