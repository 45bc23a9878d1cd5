//! Annotation data model and store
//!
//! An annotation is an acceptance mark (rendered as a circle) or a
//! categorized defect mark (rendered as a rectangle) on a single page.
//! Geometry is canonical and immutable after creation; the defect text is
//! rendered once from its reason template and stored verbatim so later
//! taxonomy changes never rewrite history.

use crate::geometry::PageRect;

/// Unique identifier for an annotation
///
/// Stable for the session and in saved snapshots. Identity comparisons for
/// selection and deletion go through this id, never through references.
pub type AnnotationId = uuid::Uuid;

/// The two mark kinds an inspector can place
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AnnotationKind {
    /// Plain "checked OK" mark, drawn as a circle derived from the rect
    Acceptance,

    /// Flagged problem area with categorized reason text
    Defect {
        category_id: String,
        reason_id: String,
        /// Free-text component/reference label supplied by the inspector
        tag: String,
        /// Terminal list for reasons that require one
        #[serde(default, skip_serializing_if = "Option::is_none")]
        terminals: Option<Vec<String>>,
        /// Reason template with placeholders substituted, frozen at creation
        rendered_text: String,
    },
}

/// A single placed mark
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Annotation {
    id: AnnotationId,
    page_index: u16,
    rect: PageRect,
    /// Unix timestamp in seconds, informational only
    created_at: i64,
    kind: AnnotationKind,
}

fn now_unix_seconds() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

impl Annotation {
    /// Create an acceptance mark
    pub fn acceptance(page_index: u16, rect: PageRect) -> Self {
        Self {
            id: AnnotationId::new_v4(),
            page_index,
            rect,
            created_at: now_unix_seconds(),
            kind: AnnotationKind::Acceptance,
        }
    }

    /// Create a defect mark with its text already rendered
    pub fn defect(
        page_index: u16,
        rect: PageRect,
        category_id: String,
        reason_id: String,
        tag: String,
        terminals: Option<Vec<String>>,
        rendered_text: String,
    ) -> Self {
        Self {
            id: AnnotationId::new_v4(),
            page_index,
            rect,
            created_at: now_unix_seconds(),
            kind: AnnotationKind::Defect {
                category_id,
                reason_id,
                tag,
                terminals,
                rendered_text,
            },
        }
    }

    pub fn id(&self) -> AnnotationId {
        self.id
    }

    pub fn page_index(&self) -> u16 {
        self.page_index
    }

    pub fn rect(&self) -> &PageRect {
        &self.rect
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn kind(&self) -> &AnnotationKind {
        &self.kind
    }

    pub fn is_defect(&self) -> bool {
        matches!(self.kind, AnnotationKind::Defect { .. })
    }

    /// Rendered defect text, None for acceptance marks
    pub fn rendered_text(&self) -> Option<&str> {
        match &self.kind {
            AnnotationKind::Defect { rendered_text, .. } => Some(rendered_text),
            AnnotationKind::Acceptance => None,
        }
    }
}

/// Ordered collection of annotations for the loaded document
///
/// Insertion order is the display and hit-test iteration order; it carries no
/// other meaning. Single-threaded, no rollback: callers that fail after an
/// insert must decide for themselves whether to remove again.
#[derive(Debug, Default)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an annotation, preserving insertion order
    pub fn insert(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Remove by identity; no-op returning None if the id is absent
    pub fn remove(&mut self, id: AnnotationId) -> Option<Annotation> {
        let index = self.annotations.iter().position(|a| a.id() == id)?;
        Some(self.annotations.remove(index))
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id() == id)
    }

    /// Ordered subsequence of annotations on one page
    pub fn for_page(&self, page_index: u16) -> Vec<&Annotation> {
        self.annotations
            .iter()
            .filter(|a| a.page_index() == page_index)
            .collect()
    }

    /// All annotations in insertion order
    pub fn all(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Drop everything; used on document reload
    pub fn clear(&mut self) {
        self.annotations.clear();
    }

    /// Replace the whole store, e.g. when resuming a saved session
    pub fn replace(&mut self, annotations: Vec<Annotation>) {
        self.annotations = annotations;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PageCoordinate;

    fn rect(x1: f32, y1: f32, x2: f32, y2: f32) -> PageRect {
        PageRect::from_corners(PageCoordinate::new(x1, y1), PageCoordinate::new(x2, y2))
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Annotation::acceptance(0, rect(0.0, 0.0, 10.0, 10.0));
        let b = Annotation::acceptance(0, rect(0.0, 0.0, 10.0, 10.0));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_defect_keeps_rendered_text_verbatim() {
        let annotation = Annotation::defect(
            2,
            rect(5.0, 5.0, 25.0, 15.0),
            "Wrong Wiring".into(),
            "Color Code Wrong".into(),
            "TB1".into(),
            None,
            "TB1 Color Code Wrong".into(),
        );
        assert!(annotation.is_defect());
        assert_eq!(annotation.rendered_text(), Some("TB1 Color Code Wrong"));
        assert_eq!(annotation.page_index(), 2);
    }

    #[test]
    fn test_store_preserves_insertion_order_per_page() {
        let mut store = AnnotationStore::new();
        let first = Annotation::acceptance(0, rect(0.0, 0.0, 10.0, 10.0));
        let other_page = Annotation::acceptance(1, rect(0.0, 0.0, 10.0, 10.0));
        let second = Annotation::acceptance(0, rect(20.0, 20.0, 30.0, 30.0));

        let first_id = first.id();
        let second_id = second.id();
        store.insert(first);
        store.insert(other_page);
        store.insert(second);

        let page = store.for_page(0);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id(), first_id);
        assert_eq!(page[1].id(), second_id);
    }

    #[test]
    fn test_remove_is_identity_based_and_idempotent() {
        let mut store = AnnotationStore::new();
        let annotation = Annotation::acceptance(0, rect(0.0, 0.0, 10.0, 10.0));
        let id = annotation.id();
        store.insert(annotation);

        assert!(store.remove(id).is_some());
        assert!(store.remove(id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_replace_swaps_whole_store() {
        let mut store = AnnotationStore::new();
        store.insert(Annotation::acceptance(0, rect(0.0, 0.0, 10.0, 10.0)));

        let replacement = vec![
            Annotation::acceptance(3, rect(0.0, 0.0, 5.0, 5.0)),
            Annotation::acceptance(3, rect(10.0, 10.0, 15.0, 15.0)),
        ];
        store.replace(replacement);

        assert_eq!(store.len(), 2);
        assert!(store.for_page(0).is_empty());
        assert_eq!(store.for_page(3).len(), 2);
    }

    #[test]
    fn test_annotation_survives_json_round_trip() {
        let annotation = Annotation::defect(
            1,
            rect(10.0, 10.0, 40.0, 30.0),
            "General".into(),
            "Connection Loose".into(),
            "X3".into(),
            Some(vec!["4".into(), "5".into()]),
            "X3 Connection Loose at terminals 4, 5".into(),
        );

        let json = serde_json::to_string(&annotation).unwrap();
        let back: Annotation = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), annotation.id());
        assert_eq!(back.kind(), annotation.kind());
        assert_eq!(back.rect(), annotation.rect());
    }
}
