//! Circuit Inspector Core Library
//!
//! Annotation lifecycle engine for the circuit-diagram inspection tool:
//! canonical/device coordinate transforms, the annotation store, hit testing
//! and selection, the gesture state machine, the defect taxonomy, and session
//! snapshot persistence.

pub mod annotation;
pub mod geometry;
pub mod gesture;
pub mod hit;
pub mod session;
pub mod snapshot;
pub mod taxonomy;
pub mod transform;

pub use annotation::{Annotation, AnnotationId, AnnotationKind, AnnotationStore};
pub use geometry::{PageCoordinate, PageRect};
pub use gesture::{
    DefectPrompt, GestureController, GestureOutcome, MarkKind, Preview, MIN_SPAN_PX,
};
pub use hit::{find_top_hit, hit_test, SelectionState};
pub use session::{delete_selected, suggest_cabinet_id, EditError, SessionState};
pub use snapshot::{load_snapshot, read_snapshot, save_snapshot, SnapshotError};
pub use taxonomy::{Category, DefectChoice, DefectTaxonomy, Reason};
pub use transform::{ViewTransform, BASE_RENDER_SCALE, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
