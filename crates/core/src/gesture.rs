//! Gesture state machine
//!
//! Turns raw press/drag/release pointer events in device space into validated
//! annotations. One gesture may be in flight at a time; a press while already
//! drawing abandons the old gesture and starts the new one. Previews are
//! transient device-space shapes and commit nothing.

use crate::annotation::{Annotation, AnnotationId, AnnotationStore};
use crate::geometry::PageRect;
use crate::hit;
use crate::session::SessionState;
use crate::taxonomy::{DefectChoice, DefectTaxonomy};

/// Minimum gesture span in device pixels
///
/// A drag radius or rectangle side must reach this to create an annotation;
/// exactly hitting the threshold counts (`>=`). Anything smaller is a slip of
/// the hand and is discarded silently.
pub const MIN_SPAN_PX: f32 = 6.0;

/// The mark kind a draw gesture was started for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    Acceptance,
    Defect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum GestureState {
    Idle,
    Drawing { kind: MarkKind, anchor: (f32, f32) },
}

/// Transient device-space shape shown while dragging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Preview {
    Circle { center: (f32, f32), radius: f32 },
    Rect { x1: f32, y1: f32, x2: f32, y2: f32 },
}

/// External collaborator that asks the inspector for defect details
///
/// Both prompts are cancellable; any cancellation aborts the gesture with
/// nothing created or persisted.
pub trait DefectPrompt {
    /// Free-text component/reference label, e.g. "TB1" or "Wire X3-5"
    fn request_tag(&mut self) -> Option<String>;

    /// Category, reason, and any auxiliary terminal list
    fn request_classification(&mut self) -> Option<DefectChoice>;
}

/// What a completed gesture produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Below the minimum span, or a prompt was cancelled; nothing changed
    Discarded,

    /// Acceptance mark inserted into the store
    Accepted(AnnotationId),

    /// Defect inserted into the store; the caller must append it to the
    /// inspection log
    DefectRecorded(AnnotationId),
}

/// Converts pointer events into annotations
#[derive(Debug)]
pub struct GestureController {
    state: GestureState,
    taxonomy: DefectTaxonomy,
}

impl GestureController {
    pub fn new(taxonomy: DefectTaxonomy) -> Self {
        Self {
            state: GestureState::Idle,
            taxonomy,
        }
    }

    pub fn taxonomy(&self) -> &DefectTaxonomy {
        &self.taxonomy
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, GestureState::Drawing { .. })
    }

    /// Pointer down: start drawing the given kind from this anchor
    pub fn press(&mut self, kind: MarkKind, device_point: (f32, f32)) {
        if self.is_drawing() {
            log::warn!("press while a gesture was in flight; restarting");
        }
        self.state = GestureState::Drawing {
            kind,
            anchor: device_point,
        };
    }

    /// Pointer move: candidate shape from anchor to the current position
    pub fn preview(&self, device_point: (f32, f32)) -> Option<Preview> {
        let GestureState::Drawing { kind, anchor } = self.state else {
            return None;
        };
        Some(match kind {
            MarkKind::Acceptance => Preview::Circle {
                center: anchor,
                radius: span_radius(anchor, device_point),
            },
            MarkKind::Defect => {
                let (x1, y1, x2, y2) = normalized_corners(anchor, device_point);
                Preview::Rect { x1, y1, x2, y2 }
            }
        })
    }

    /// Pointer up: validate, prompt for defects, and commit to the store
    pub fn release(
        &mut self,
        device_point: (f32, f32),
        session: &SessionState,
        store: &mut AnnotationStore,
        prompt: &mut dyn DefectPrompt,
    ) -> GestureOutcome {
        let GestureState::Drawing { kind, anchor } = self.state else {
            return GestureOutcome::Discarded;
        };
        self.state = GestureState::Idle;

        let transform = session.transform();
        match kind {
            MarkKind::Acceptance => {
                let radius = span_radius(anchor, device_point);
                if radius < MIN_SPAN_PX {
                    return GestureOutcome::Discarded;
                }
                let rect = transform.rect_to_canonical(
                    (anchor.0 - radius, anchor.1 - radius),
                    (anchor.0 + radius, anchor.1 + radius),
                );
                let annotation = Annotation::acceptance(session.page_index, rect);
                let id = annotation.id();
                store.insert(annotation);
                GestureOutcome::Accepted(id)
            }
            MarkKind::Defect => {
                let (x1, y1, x2, y2) = normalized_corners(anchor, device_point);
                if (x2 - x1).min(y2 - y1) < MIN_SPAN_PX {
                    return GestureOutcome::Discarded;
                }
                let rect = transform.rect_to_canonical((x1, y1), (x2, y2));
                match self.finalize_defect(session.page_index, rect, prompt) {
                    Some(annotation) => {
                        let id = annotation.id();
                        store.insert(annotation);
                        GestureOutcome::DefectRecorded(id)
                    }
                    None => GestureOutcome::Discarded,
                }
            }
        }
    }

    /// Run the tag and classification prompts; None on any cancellation
    fn finalize_defect(
        &self,
        page_index: u16,
        rect: PageRect,
        prompt: &mut dyn DefectPrompt,
    ) -> Option<Annotation> {
        let tag = prompt.request_tag().filter(|t| !t.trim().is_empty())?;
        let choice = prompt.request_classification()?;

        let Some(reason) = self.taxonomy.reason(&choice.category_id, &choice.reason_id) else {
            log::warn!(
                "classification prompt returned unknown reason {}/{}",
                choice.category_id,
                choice.reason_id
            );
            return None;
        };

        let rendered_text =
            self.taxonomy
                .render_text(reason, &tag, choice.terminals.as_deref())?;

        Some(Annotation::defect(
            page_index,
            rect,
            choice.category_id,
            choice.reason_id,
            tag,
            choice.terminals,
            rendered_text,
        ))
    }
}

/// Modified press: selection instead of drawing
///
/// Hit-tests the current page in store order and applies toggle semantics to
/// the session's selection.
pub fn select_at(device_point: (f32, f32), session: &mut SessionState, store: &AnnotationStore) {
    let point = session.transform().to_canonical(device_point);
    let hit = hit::find_top_hit(&point, store.for_page(session.page_index)).map(|a| a.id());
    session.selection.press(hit);
}

fn span_radius(anchor: (f32, f32), point: (f32, f32)) -> f32 {
    let dx = point.0 - anchor.0;
    let dy = point.1 - anchor.1;
    (dx * dx + dy * dy).sqrt()
}

fn normalized_corners(a: (f32, f32), b: (f32, f32)) -> (f32, f32, f32, f32) {
    (
        a.0.min(b.0),
        a.1.min(b.1),
        a.0.max(b.0),
        a.1.max(b.1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::AnnotationKind;

    /// Prompt stub with scripted answers
    struct ScriptedPrompt {
        tag: Option<String>,
        choice: Option<DefectChoice>,
        tag_requests: usize,
        classification_requests: usize,
    }

    impl ScriptedPrompt {
        fn answering(tag: &str, category: &str, reason: &str) -> Self {
            Self {
                tag: Some(tag.to_string()),
                choice: Some(DefectChoice {
                    category_id: category.to_string(),
                    reason_id: reason.to_string(),
                    terminals: None,
                }),
                tag_requests: 0,
                classification_requests: 0,
            }
        }

        fn cancelling() -> Self {
            Self {
                tag: None,
                choice: None,
                tag_requests: 0,
                classification_requests: 0,
            }
        }
    }

    impl DefectPrompt for ScriptedPrompt {
        fn request_tag(&mut self) -> Option<String> {
            self.tag_requests += 1;
            self.tag.clone()
        }

        fn request_classification(&mut self) -> Option<DefectChoice> {
            self.classification_requests += 1;
            self.choice.clone()
        }
    }

    fn controller() -> GestureController {
        GestureController::new(DefectTaxonomy::standard())
    }

    fn session() -> SessionState {
        SessionState::for_document(3, "CAB-1")
    }

    #[test]
    fn test_acceptance_gesture_creates_circle_rect() {
        let mut gestures = controller();
        let mut store = AnnotationStore::new();
        let session = session();
        let mut prompt = ScriptedPrompt::cancelling();

        gestures.press(MarkKind::Acceptance, (100.0, 100.0));
        let outcome = gestures.release((130.0, 100.0), &session, &mut store, &mut prompt);

        let GestureOutcome::Accepted(id) = outcome else {
            panic!("expected acceptance, got {outcome:?}");
        };
        let annotation = store.get(id).unwrap();
        assert_eq!(annotation.kind(), &AnnotationKind::Acceptance);

        // Device radius 30 at zoom 1.0 (scale 2.0) is canonical radius 15
        let rect = annotation.rect();
        assert!((rect.center().x - 50.0).abs() < 1e-3);
        assert!((rect.center().y - 50.0).abs() < 1e-3);
        assert!((rect.circle_radius() - 15.0).abs() < 1e-3);
        // No prompt for acceptance marks
        assert_eq!(prompt.tag_requests, 0);
    }

    #[test]
    fn test_defect_gesture_prompts_and_renders_text() {
        let mut gestures = controller();
        let mut store = AnnotationStore::new();
        let session = session();
        let mut prompt = ScriptedPrompt::answering("TB1", "Wrong Wiring", "Color Code Wrong");

        gestures.press(MarkKind::Defect, (20.0, 20.0));
        let outcome = gestures.release((70.0, 70.0), &session, &mut store, &mut prompt);

        let GestureOutcome::DefectRecorded(id) = outcome else {
            panic!("expected defect, got {outcome:?}");
        };
        let annotation = store.get(id).unwrap();
        assert_eq!(annotation.rendered_text(), Some("TB1 Color Code Wrong"));
        assert_eq!(prompt.tag_requests, 1);
        assert_eq!(prompt.classification_requests, 1);
    }

    #[test]
    fn test_sub_threshold_gesture_is_discarded() {
        let mut gestures = controller();
        let mut store = AnnotationStore::new();
        let session = session();
        let mut prompt = ScriptedPrompt::answering("TB1", "Wrong Wiring", "Color Code Wrong");

        gestures.press(MarkKind::Defect, (10.0, 10.0));
        let outcome = gestures.release((14.0, 60.0), &session, &mut store, &mut prompt);

        assert_eq!(outcome, GestureOutcome::Discarded);
        assert!(store.is_empty());
        // Prompt never shown for a discarded gesture
        assert_eq!(prompt.tag_requests, 0);
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        // Exactly MIN_SPAN_PX is accepted; a hair under is not.
        let mut gestures = controller();
        let mut store = AnnotationStore::new();
        let session = session();
        let mut prompt = ScriptedPrompt::cancelling();

        gestures.press(MarkKind::Acceptance, (0.0, 0.0));
        let at = gestures.release((MIN_SPAN_PX, 0.0), &session, &mut store, &mut prompt);
        assert!(matches!(at, GestureOutcome::Accepted(_)));

        gestures.press(MarkKind::Acceptance, (0.0, 0.0));
        let under = gestures.release((MIN_SPAN_PX - 0.01, 0.0), &session, &mut store, &mut prompt);
        assert_eq!(under, GestureOutcome::Discarded);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_cancelled_tag_aborts_without_classification() {
        let mut gestures = controller();
        let mut store = AnnotationStore::new();
        let session = session();
        let mut prompt = ScriptedPrompt::cancelling();

        gestures.press(MarkKind::Defect, (0.0, 0.0));
        let outcome = gestures.release((50.0, 50.0), &session, &mut store, &mut prompt);

        assert_eq!(outcome, GestureOutcome::Discarded);
        assert!(store.is_empty());
        assert_eq!(prompt.tag_requests, 1);
        assert_eq!(prompt.classification_requests, 0);
    }

    #[test]
    fn test_blank_tag_counts_as_cancelled() {
        let mut gestures = controller();
        let mut store = AnnotationStore::new();
        let session = session();
        let mut prompt = ScriptedPrompt::answering("   ", "Wrong Wiring", "Color Code Wrong");

        gestures.press(MarkKind::Defect, (0.0, 0.0));
        let outcome = gestures.release((50.0, 50.0), &session, &mut store, &mut prompt);
        assert_eq!(outcome, GestureOutcome::Discarded);
        assert!(store.is_empty());
    }

    #[test]
    fn test_missing_required_terminals_aborts() {
        let mut gestures = controller();
        let mut store = AnnotationStore::new();
        let session = session();
        let mut prompt = ScriptedPrompt::answering("X2", "General", "Connection Loose");

        gestures.press(MarkKind::Defect, (0.0, 0.0));
        let outcome = gestures.release((50.0, 50.0), &session, &mut store, &mut prompt);
        assert_eq!(outcome, GestureOutcome::Discarded);
        assert!(store.is_empty());
    }

    #[test]
    fn test_new_press_resets_gesture_in_flight() {
        let mut gestures = controller();
        let mut store = AnnotationStore::new();
        let session = session();
        let mut prompt = ScriptedPrompt::cancelling();

        gestures.press(MarkKind::Acceptance, (500.0, 500.0));
        // Second press replaces the first anchor entirely
        gestures.press(MarkKind::Acceptance, (0.0, 0.0));
        let outcome = gestures.release((40.0, 0.0), &session, &mut store, &mut prompt);

        let GestureOutcome::Accepted(id) = outcome else {
            panic!("expected acceptance, got {outcome:?}");
        };
        let center = store.get(id).unwrap().rect().center();
        assert!((center.x - 0.0).abs() < 1e-3);
    }

    #[test]
    fn test_preview_follows_pointer_without_committing() {
        let mut gestures = controller();
        gestures.press(MarkKind::Defect, (10.0, 10.0));

        let preview = gestures.preview((40.0, 30.0)).unwrap();
        assert_eq!(
            preview,
            Preview::Rect {
                x1: 10.0,
                y1: 10.0,
                x2: 40.0,
                y2: 30.0
            }
        );

        // Preview with no gesture in flight is None
        let mut idle = controller();
        assert!(idle.preview((0.0, 0.0)).is_none());
        idle.press(MarkKind::Acceptance, (0.0, 0.0));
        assert_eq!(
            idle.preview((3.0, 4.0)).unwrap(),
            Preview::Circle {
                center: (0.0, 0.0),
                radius: 5.0
            }
        );
    }

    #[test]
    fn test_select_at_routes_to_hit_testing() {
        let mut gestures = controller();
        let mut store = AnnotationStore::new();
        let mut session = session();
        let mut prompt = ScriptedPrompt::answering("F1", "Fuse", "Fuse Missing");

        gestures.press(MarkKind::Defect, (20.0, 20.0));
        let GestureOutcome::DefectRecorded(id) =
            gestures.release((80.0, 80.0), &session, &mut store, &mut prompt)
        else {
            panic!("expected defect");
        };

        // Press inside the mark selects it, pressing again deselects
        select_at((50.0, 50.0), &mut session, &store);
        assert!(session.selection.is_selected(id));
        select_at((50.0, 50.0), &mut session, &store);
        assert_eq!(session.selection.selected(), None);

        // Press on empty space leaves nothing selected
        select_at((50.0, 50.0), &mut session, &store);
        select_at((500.0, 500.0), &mut session, &store);
        assert_eq!(session.selection.selected(), None);
    }
}
