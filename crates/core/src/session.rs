//! Per-event session state
//!
//! Current page, zoom, identity fields, and the selection live in one plain
//! structure that event handlers receive and return explicitly instead of
//! reading ambient mutable globals. That keeps event ordering visible and
//! test setup trivial.

use std::path::Path;

use crate::annotation::{Annotation, AnnotationStore};
use crate::hit::SelectionState;
use crate::transform::{self, ViewTransform};

/// UI state threaded through the gesture controller and renderer
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub page_index: u16,
    pub page_count: u16,
    pub zoom: f32,
    /// Cabinet identity this session inspects; keys the snapshot file
    pub cabinet_id: String,
    /// Inspector identity recorded in log provenance
    pub inspector: String,
    pub selection: SelectionState,
}

impl SessionState {
    /// Fresh state for a newly loaded document
    pub fn for_document(page_count: u16, cabinet_id: impl Into<String>) -> Self {
        Self {
            page_index: 0,
            page_count,
            zoom: 1.0,
            cabinet_id: cabinet_id.into(),
            inspector: default_inspector(),
            selection: SelectionState::new(),
        }
    }

    /// Transform for the current zoom level
    pub fn transform(&self) -> ViewTransform {
        ViewTransform::new(self.zoom)
    }

    pub fn zoomed_in(&self) -> Self {
        Self {
            zoom: transform::zoom_in(self.zoom),
            ..self.clone()
        }
    }

    pub fn zoomed_out(&self) -> Self {
        Self {
            zoom: transform::zoom_out(self.zoom),
            ..self.clone()
        }
    }

    pub fn next_page(&self) -> Self {
        let last = self.page_count.saturating_sub(1);
        Self {
            page_index: self.page_index.saturating_add(1).min(last),
            ..self.clone()
        }
    }

    pub fn prev_page(&self) -> Self {
        Self {
            page_index: self.page_index.saturating_sub(1),
            ..self.clone()
        }
    }

    /// State after reloading a document: page, zoom, and selection reset
    pub fn reloaded(&self, page_count: u16, cabinet_id: impl Into<String>) -> Self {
        Self {
            page_index: 0,
            page_count,
            zoom: 1.0,
            cabinet_id: cabinet_id.into(),
            inspector: self.inspector.clone(),
            selection: SelectionState::new(),
        }
    }
}

/// Errors from selection-driven edits
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditError {
    #[error("no annotation selected")]
    NothingSelected,

    #[error("selected annotation no longer exists")]
    SelectionStale,
}

/// Delete the selected annotation and clear the selection
///
/// Deleting with no selection is a reported no-op, not a crash.
pub fn delete_selected(
    store: &mut AnnotationStore,
    selection: &mut SelectionState,
) -> Result<Annotation, EditError> {
    let id = selection.selected().ok_or(EditError::NothingSelected)?;
    let removed = store.remove(id).ok_or(EditError::SelectionStale)?;
    selection.clear();
    Ok(removed)
}

/// Suggest a cabinet id from the document filename
///
/// Basename with the `.pdf` extension stripped and underscores replaced by
/// dashes, matching how sites name their diagram files.
pub fn suggest_cabinet_id(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.trim_end_matches(".pdf").replace('_', "-")
}

fn default_inspector() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "inspector".to_string())
}
