//! Integration tests: saving and restoring the marker file.

use canvas_markers::persist::{self, LoadOutcome};
use canvas_markers::{Marker, MarkerStore};
use egui::{pos2, vec2};
use pretty_assertions::assert_eq;

fn summary(markers: &[Marker]) -> Vec<(usize, (f32, f32), (f32, f32), bool)> {
    markers
        .iter()
        .map(|m| (m.id, (m.pos.x, m.pos.y), (m.size.x, m.size.y), m.selected))
        .collect()
}

// ─── Round trip ─────────────────────────────────────────────────────────

#[test]
fn save_then_load_restores_markers_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("markers.json");

    let mut store = MarkerStore::new();
    store.add(pos2(10.0, 10.0), vec2(5.0, 5.0), None);
    store.add(pos2(50.5, 20.25), vec2(1.0, 100.0), None);
    store.add(pos2(300.0, 700.0), vec2(12.0, 3.0), None);
    store.remove_closest_to(pos2(49.0, 20.0));
    store.select_at(pos2(10.0, 10.0));

    persist::save(&path, store.all()).unwrap();
    let LoadOutcome::Loaded(restored) = persist::load(&path) else {
        panic!("expected markers to load");
    };

    assert_eq!(
        summary(&restored),
        vec![
            (0, (10.0, 10.0), (5.0, 5.0), false),
            (1, (300.0, 700.0), (12.0, 3.0), false),
        ]
    );
}

#[test]
fn save_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("markers.json");
    std::fs::write(&path, "not json at all, and quite long ".repeat(20)).unwrap();

    let markers = vec![Marker::new(0, pos2(1.0, 2.0), vec2(3.0, 4.0))];
    persist::save(&path, &markers).unwrap();

    let restored = persist::load(&path).into_markers(&path);
    assert_eq!(summary(&restored), summary(&markers));
}

#[test]
fn empty_store_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("markers.json");
    persist::save(&path, &[]).unwrap();
    assert!(matches!(persist::load(&path), LoadOutcome::Loaded(m) if m.is_empty()));
}

// ─── Best-effort restore ────────────────────────────────────────────────

#[test]
fn missing_file_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");
    assert!(matches!(persist::load(&path), LoadOutcome::Absent));
    assert!(persist::load(&path).into_markers(&path).is_empty());
}

#[test]
fn corrupt_file_yields_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("markers.json");
    std::fs::write(&path, r#"{ "markers": [ { "id": 0, "pos": [1, "#).unwrap();

    let outcome = persist::load(&path);
    assert!(matches!(outcome, LoadOutcome::Corrupt(_)));
    let store = MarkerStore::from_markers(outcome.into_markers(&path));
    assert!(store.is_empty());
}

#[test]
fn directory_in_place_of_file_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(persist::load(dir.path()), LoadOutcome::Corrupt(_)));
}

#[test]
fn save_into_missing_directory_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("markers.json");
    assert!(matches!(
        persist::save(&path, &[]),
        Err(persist::PersistError::Io(_))
    ));
}
