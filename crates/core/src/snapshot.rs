//! Session snapshot persistence
//!
//! The full annotation store is dumped to one JSON file per cabinet so an
//! interrupted session can be resumed. The snapshot is the session's own
//! record; the inspection log is written separately and independently.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::annotation::{Annotation, AnnotationStore};

/// Error types for snapshot operations
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Snapshot file path for a cabinet, `<cabinet>_annotations.json`
pub fn snapshot_path(dir: &Path, cabinet_id: &str) -> PathBuf {
    dir.join(format!("{cabinet_id}_annotations.json"))
}

/// Save the whole store to the cabinet's snapshot file
///
/// Written atomically via a temporary file and rename so a crash mid-write
/// never leaves a truncated snapshot.
pub fn save_snapshot(
    dir: &Path,
    cabinet_id: &str,
    store: &AnnotationStore,
) -> SnapshotResult<PathBuf> {
    let path = snapshot_path(dir, cabinet_id);
    let json = serde_json::to_string_pretty(store.all())
        .map_err(|e| SnapshotError::Serialization(e.to_string()))?;

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, json)?;
    fs::rename(&temp_path, &path)?;

    Ok(path)
}

/// Load the snapshot for a cabinet, or None if no snapshot exists
pub fn load_snapshot(dir: &Path, cabinet_id: &str) -> SnapshotResult<Option<Vec<Annotation>>> {
    let path = snapshot_path(dir, cabinet_id);
    if !path.exists() {
        return Ok(None);
    }
    Ok(Some(read_snapshot(&path)?))
}

/// Read a snapshot file directly by path
pub fn read_snapshot(path: &Path) -> SnapshotResult<Vec<Annotation>> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| SnapshotError::Deserialization(e.to_string()))
}
