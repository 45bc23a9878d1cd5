//! Hit testing and selection
//!
//! Acceptance marks hit as filled circles (distance to the rect center within
//! the derived radius); defect marks hit as inclusive rectangles. When marks
//! overlap, the first one in store order wins. Overlaps are rare and selection
//! is manual, so the earlier-inserted mark keeping priority is acceptable.

use crate::annotation::{Annotation, AnnotationId, AnnotationKind};
use crate::geometry::PageCoordinate;

/// Whether a canonical-space point hits one annotation
pub fn hit_test(point: &PageCoordinate, annotation: &Annotation) -> bool {
    let rect = annotation.rect();
    match annotation.kind() {
        AnnotationKind::Acceptance => {
            point.distance_to(&rect.center()) <= rect.circle_radius()
        }
        AnnotationKind::Defect { .. } => rect.contains(point),
    }
}

/// First annotation in iteration order that contains the point
pub fn find_top_hit<'a, I>(point: &PageCoordinate, annotations: I) -> Option<&'a Annotation>
where
    I: IntoIterator<Item = &'a Annotation>,
{
    annotations.into_iter().find(|a| hit_test(point, a))
}

/// At most one selected annotation, referenced by id
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SelectionState {
    selected: Option<AnnotationId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<AnnotationId> {
        self.selected
    }

    pub fn is_selected(&self, id: AnnotationId) -> bool {
        self.selected == Some(id)
    }

    /// Apply the result of a selection press
    ///
    /// A hit on the already-selected annotation clears the selection, a hit
    /// on a different one replaces it, a press on empty space clears it.
    pub fn press(&mut self, hit: Option<AnnotationId>) {
        self.selected = match hit {
            Some(id) if self.selected == Some(id) => None,
            other => other,
        };
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PageRect;

    fn acceptance(x1: f32, y1: f32, x2: f32, y2: f32) -> Annotation {
        Annotation::acceptance(
            0,
            PageRect::from_corners(PageCoordinate::new(x1, y1), PageCoordinate::new(x2, y2)),
        )
    }

    fn defect(x1: f32, y1: f32, x2: f32, y2: f32) -> Annotation {
        Annotation::defect(
            0,
            PageRect::from_corners(PageCoordinate::new(x1, y1), PageCoordinate::new(x2, y2)),
            "General".into(),
            "Other".into(),
            "K1".into(),
            None,
            "K1 Other".into(),
        )
    }

    #[test]
    fn test_defect_hit_is_inclusive_rect() {
        let annotation = defect(10.0, 10.0, 20.0, 20.0);
        assert!(hit_test(&PageCoordinate::new(10.0, 10.0), &annotation));
        assert!(hit_test(&PageCoordinate::new(20.0, 20.0), &annotation));
        assert!(!hit_test(&PageCoordinate::new(20.5, 15.0), &annotation));
    }

    #[test]
    fn test_acceptance_hit_is_filled_circle() {
        // Square rect: center (50, 50), radius 10
        let annotation = acceptance(40.0, 40.0, 60.0, 60.0);
        assert!(hit_test(&PageCoordinate::new(50.0, 50.0), &annotation));
        assert!(hit_test(&PageCoordinate::new(59.9, 50.0), &annotation));
        // Rect corner lies outside the inscribed circle
        assert!(!hit_test(&PageCoordinate::new(59.0, 59.0), &annotation));
    }

    #[test]
    fn test_first_inserted_wins_for_overlaps() {
        let first = defect(0.0, 0.0, 50.0, 50.0);
        let second = defect(25.0, 25.0, 75.0, 75.0);
        let first_id = first.id();

        let annotations = [first, second];
        let hit = find_top_hit(&PageCoordinate::new(30.0, 30.0), annotations.iter());
        assert_eq!(hit.map(|a| a.id()), Some(first_id));
    }

    #[test]
    fn test_no_hit_on_empty_space() {
        let annotations = [defect(0.0, 0.0, 10.0, 10.0)];
        assert!(find_top_hit(&PageCoordinate::new(100.0, 100.0), annotations.iter()).is_none());
    }

    #[test]
    fn test_selection_toggles() {
        let mut selection = SelectionState::new();
        let a = AnnotationId::new_v4();
        let b = AnnotationId::new_v4();

        selection.press(Some(a));
        assert!(selection.is_selected(a));

        // Hit on a different annotation replaces the selection
        selection.press(Some(b));
        assert!(selection.is_selected(b));

        // Hit on the selected annotation clears it
        selection.press(Some(b));
        assert_eq!(selection.selected(), None);

        // Press on empty space clears
        selection.press(Some(a));
        selection.press(None);
        assert_eq!(selection.selected(), None);
    }
}
