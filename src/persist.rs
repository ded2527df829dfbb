//! On-disk marker file.
//!
//! ```json
//! { "markers": [ { "id": 0, "pos": [10.0, 10.0], "size": [5.0, 5.0] } ] }
//! ```
//!
//! Extra fields are ignored on load. Selection is never written.

use crate::marker::{clamp_size, Marker};
use egui::{pos2, vec2};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MARKERS_FILE: &str = "markers.json";

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid marker file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct MarkerRecord {
    id: usize,
    pos: (f32, f32),
    size: (f32, f32),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct MarkerFile {
    markers: Vec<MarkerRecord>,
}

#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Vec<Marker>),
    Absent,
    Corrupt(PersistError),
}

impl LoadOutcome {
    /// The restored markers, or an empty set when nothing usable was found.
    pub fn into_markers(self, path: &Path) -> Vec<Marker> {
        match self {
            LoadOutcome::Loaded(markers) => {
                log::info!("restored {} markers from {}", markers.len(), path.display());
                markers
            }
            LoadOutcome::Absent => {
                log::info!("no marker file at {}, starting empty", path.display());
                Vec::new()
            }
            LoadOutcome::Corrupt(err) => {
                log::warn!("ignoring {}: {err}", path.display());
                Vec::new()
            }
        }
    }
}

pub fn load(path: &Path) -> LoadOutcome {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return LoadOutcome::Absent,
        Err(err) => return LoadOutcome::Corrupt(err.into()),
    };
    match from_json(&data) {
        Ok(markers) => LoadOutcome::Loaded(markers),
        Err(err) => LoadOutcome::Corrupt(err),
    }
}

pub fn save(path: &Path, markers: &[Marker]) -> Result<(), PersistError> {
    let data = to_json(markers)?;
    std::fs::write(path, data)?;
    log::info!("saved {} markers to {}", markers.len(), path.display());
    Ok(())
}

pub fn to_json(markers: &[Marker]) -> Result<String, PersistError> {
    let file = MarkerFile {
        markers: markers
            .iter()
            .map(|m| MarkerRecord {
                id: m.id,
                pos: (m.pos.x, m.pos.y),
                size: (m.size.x, m.size.y),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Parse a marker document. Records are ordered by `id` and renumbered
/// from zero, sizes are clamped into range.
pub fn from_json(data: &str) -> Result<Vec<Marker>, PersistError> {
    let mut file: MarkerFile = serde_json::from_str(data)?;
    file.markers.sort_by_key(|r| r.id);
    Ok(file
        .markers
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            let size = vec2(r.size.0, r.size.1);
            let clamped = clamp_size(size);
            if clamped != size {
                log::debug!("marker {} size {:?} clamped to {:?}", r.id, size, clamped);
            }
            Marker::new(i, pos2(r.pos.0, r.pos.1), clamped)
        })
        .collect())
}
