//! Canonical page-space geometry
//!
//! All stored annotation geometry lives in canonical page space: the page as
//! rendered at scale 1.0, origin at the top-left, units in points. Zoom is a
//! display concern and never appears in stored coordinates.

/// A point in canonical page space
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageCoordinate {
    pub x: f32,
    pub y: f32,
}

impl PageCoordinate {
    /// Create a new page coordinate
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate Euclidean distance to another coordinate
    pub fn distance_to(&self, other: &PageCoordinate) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned rectangle in canonical page space
///
/// Always normalized: `x1 <= x2` and `y1 <= y2`, enforced at construction.
/// Immutable once attached to an annotation.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageRect {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl PageRect {
    /// Build a normalized rectangle from two opposite corners in any order
    pub fn from_corners(a: PageCoordinate, b: PageCoordinate) -> Self {
        Self {
            x1: a.x.min(b.x),
            y1: a.y.min(b.y),
            x2: a.x.max(b.x),
            y2: a.y.max(b.y),
        }
    }

    /// Build the bounding square of a circle
    pub fn from_circle(center: PageCoordinate, radius: f32) -> Self {
        let r = radius.abs();
        Self {
            x1: center.x - r,
            y1: center.y - r,
            x2: center.x + r,
            y2: center.y + r,
        }
    }

    pub fn x1(&self) -> f32 {
        self.x1
    }

    pub fn y1(&self) -> f32 {
        self.y1
    }

    pub fn x2(&self) -> f32 {
        self.x2
    }

    pub fn y2(&self) -> f32 {
        self.y2
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Center of the rectangle
    pub fn center(&self) -> PageCoordinate {
        PageCoordinate::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Half the longer side; the radius of the circle an acceptance mark
    /// derives from this rectangle
    pub fn circle_radius(&self) -> f32 {
        self.width().max(self.height()) / 2.0
    }

    /// Inclusive containment check
    pub fn contains(&self, point: &PageCoordinate) -> bool {
        point.x >= self.x1 && point.x <= self.x2 && point.y >= self.y1 && point.y <= self.y2
    }
}
