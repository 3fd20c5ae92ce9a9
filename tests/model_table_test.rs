// ABOUTME: Integration tests for loading and validating the fitted-model table artifact
// ABOUTME: Covers missing, corrupt, empty and incomplete tables plus lazy loading via the manager
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use runcalc_core::errors::{AppError, ErrorCode};
use runcalc_intelligence::models::{
    DistanceModels, ModelCategory, ModelManager, ModelTable, ModelTableError, ZoneGroup, ZoneKey,
    ZoneModels,
};
use tempfile::TempDir;

fn write_table(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("models.json");
    fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_fixture_loads() {
    let table = common::fixture_table();

    assert_eq!(table.version(), Some("test-fixture-1"));
    assert_eq!(
        table.distances(ModelCategory::VelocityMarkers),
        vec![1500, 5000, 10_000]
    );
    assert_eq!(table.distances(ModelCategory::RaceTimes), vec![1500, 5000, 10_000]);
    assert_eq!(
        table.distances(ModelCategory::TrainingPaces),
        vec![1500, 5000, 10_000]
    );
    assert_eq!(table.zone_keys().count(), 9);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = ModelTable::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ModelTableError::NotFound { .. }));
    assert!(err.to_string().contains("Models file not found"));
}

#[test]
fn test_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = write_table(&dir, "{ not json");
    let err = ModelTable::load(&path).unwrap_err();
    assert!(matches!(err, ModelTableError::Parse(_)));
}

#[test]
fn test_empty_document() {
    let err = ModelTable::from_json_str("{}").unwrap_err();
    assert!(matches!(err, ModelTableError::Empty));
}

#[test]
fn test_missing_categories_are_all_named() {
    let err = ModelTable::from_json_str(r#"{"version": "1", "race_times": {}}"#).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("velocity_markers"));
    assert!(message.contains("race_times"));
    assert!(message.contains("training_paces"));
}

#[test]
fn test_table_errors_become_model_loading_failures() {
    let err: AppError = ModelTableError::Empty.into();
    assert_eq!(err.code, ErrorCode::ModelLoadingFailed);
}

#[test]
fn test_malformed_record_does_not_block_loading() {
    let table = common::fixture_table();
    let manager = ModelManager::from_table(table);

    let model = manager
        .get_model(ModelCategory::RaceTimes, 5000, "8000m")
        .unwrap();
    let err = model.predict(1500.0).unwrap_err();
    assert_eq!(err.code, ErrorCode::PredictionFailed);
}

// ============================================================================
// Lookups
// ============================================================================

#[test]
fn test_get_model_evaluates_polynomial() {
    let manager = common::fixture_manager();
    let model = manager
        .get_model(ModelCategory::VelocityMarkers, 5000, "vLT")
        .unwrap();
    assert!((model.predict(1500.0).unwrap() - 320.0).abs() < 1e-9);
}

#[test]
fn test_distance_models_by_category() {
    let table = common::fixture_table();
    let markers: &DistanceModels = table
        .distance_models(ModelCategory::VelocityMarkers)
        .unwrap();
    assert!(markers[&5000].contains_key("CV"));
    assert!(table.distance_models(ModelCategory::TrainingPaces).is_none());
}

#[test]
fn test_bundled_table_covers_short_distances() {
    let table = ModelTable::load(&common::bundled_table_path()).unwrap();
    let distances = table.distances(ModelCategory::VelocityMarkers);

    assert_eq!(distances.first(), Some(&400));
    assert_eq!(distances.last(), Some(&42_195));
    for distance in distances {
        let markers = &table.distance_models(ModelCategory::VelocityMarkers).unwrap()[&distance];
        for key in ["vLT", "CV", "vVO2"] {
            assert!(markers.contains_key(key), "{key} missing at {distance}m");
        }
    }
}

#[test]
fn test_training_paces_are_not_distance_keyed() {
    let manager = common::fixture_manager();
    let err = manager
        .get_model(ModelCategory::TrainingPaces, 5000, "easy")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ModelNotFound);
}

#[test]
fn test_zone_lookup() {
    let manager = common::fixture_manager();
    let easy = ZoneKey::new(ZoneGroup::Endurance, "easy", None);
    let models: ZoneModels = manager.training_pace_models(&easy).unwrap().unwrap();
    assert_eq!(models.keys().copied().collect::<Vec<_>>(), vec![1500, 5000, 10_000]);

    let unknown = ZoneKey::new(ZoneGroup::Sprint, "flying", Some(60));
    assert!(manager.training_pace_models(&unknown).unwrap().is_none());
}

// ============================================================================
// Lazy loading
// ============================================================================

#[test]
fn test_manager_loads_on_first_use() {
    let manager = ModelManager::new(common::fixture_path());
    assert!(!manager.is_loaded());

    let zones = manager.training_pace_zones().unwrap();
    assert_eq!(zones.len(), 9);
    assert!(manager.is_loaded());
}

#[test]
fn test_manager_reports_missing_table() {
    let dir = TempDir::new().unwrap();
    let manager = ModelManager::new(dir.path().join("missing.json"));
    let err = manager.available_distances(ModelCategory::RaceTimes).unwrap_err();
    assert_eq!(err.code, ErrorCode::ModelLoadingFailed);
    assert!(err.message.contains("Models file not found"));
}

#[test]
fn test_reload_reads_fresh_data() {
    let dir = TempDir::new().unwrap();
    let original = fs::read_to_string(common::fixture_path()).unwrap();
    let path = write_table(&dir, &original);

    let manager = ModelManager::new(&path);
    assert_eq!(manager.table().unwrap().version(), Some("test-fixture-1"));

    fs::write(&path, original.replace("test-fixture-1", "test-fixture-2")).unwrap();
    let reloaded = manager.reload().unwrap();

    assert_eq!(manager.table().unwrap().version(), Some("test-fixture-1"));
    assert_eq!(reloaded.table().unwrap().version(), Some("test-fixture-2"));
}

#[test]
fn test_concurrent_first_use_shares_one_table() {
    let manager = ModelManager::new(common::fixture_path());

    let tables: Vec<Arc<ModelTable>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| manager.table().unwrap())).collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert!(manager.is_loaded());
    let first = manager.table().unwrap();
    assert_eq!(tables.len(), 8);
    for table in &tables {
        assert!(Arc::ptr_eq(table, &first));
    }
}
