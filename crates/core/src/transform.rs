//! Device / canonical coordinate transform
//!
//! The rendered bitmap shown to the inspector is the canonical page scaled by
//! `zoom * base_scale`. `base_scale` is the fixed render-quality multiplier
//! applied at rasterization time; `zoom` is the interactive magnification.
//! The transform is axis-aligned uniform scaling with no rotation, which is
//! why rectangles may be transformed corner-wise.

use crate::geometry::{PageCoordinate, PageRect};

/// Fixed resolution multiplier used when rasterizing pages
pub const BASE_RENDER_SCALE: f32 = 2.0;

/// Interactive zoom bounds and step
pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.25;

/// Mapping between canonical page space and device (zoomed bitmap) space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    zoom: f32,
    base_scale: f32,
}

impl ViewTransform {
    /// Create a transform for the given interactive zoom level
    pub fn new(zoom: f32) -> Self {
        Self {
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            base_scale: BASE_RENDER_SCALE,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Combined scale factor applied to canonical coordinates
    pub fn scale(&self) -> f32 {
        self.zoom * self.base_scale
    }

    /// Canonical page point to device pixel
    pub fn to_device(&self, point: &PageCoordinate) -> (f32, f32) {
        (point.x * self.scale(), point.y * self.scale())
    }

    /// Device pixel to canonical page point; exact inverse of `to_device`
    pub fn to_canonical(&self, (x, y): (f32, f32)) -> PageCoordinate {
        PageCoordinate::new(x / self.scale(), y / self.scale())
    }

    /// Canonical length to device pixels
    pub fn length_to_device(&self, length: f32) -> f32 {
        length * self.scale()
    }

    /// Device length to canonical units
    pub fn length_to_canonical(&self, length: f32) -> f32 {
        length / self.scale()
    }

    /// Transform a device-space corner pair into a normalized canonical rect
    pub fn rect_to_canonical(&self, a: (f32, f32), b: (f32, f32)) -> PageRect {
        PageRect::from_corners(self.to_canonical(a), self.to_canonical(b))
    }

    /// Canonical rect to device-space corners `(x1, y1, x2, y2)`
    pub fn rect_to_device(&self, rect: &PageRect) -> (f32, f32, f32, f32) {
        let (x1, y1) = self.to_device(&PageCoordinate::new(rect.x1(), rect.y1()));
        let (x2, y2) = self.to_device(&PageCoordinate::new(rect.x2(), rect.y2()));
        (x1, y1, x2, y2)
    }
}

/// Next zoom level up, clamped to the valid range
pub fn zoom_in(zoom: f32) -> f32 {
    (zoom + ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Next zoom level down, clamped to the valid range
pub fn zoom_out(zoom: f32) -> f32 {
    (zoom - ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_across_zoom_range() {
        let point = PageCoordinate::new(123.25, 456.75);
        let mut zoom = MIN_ZOOM;
        while zoom <= MAX_ZOOM {
            let transform = ViewTransform::new(zoom);
            let back = transform.to_canonical(transform.to_device(&point));
            assert!((back.x - point.x).abs() < 1e-3, "zoom {zoom}");
            assert!((back.y - point.y).abs() < 1e-3, "zoom {zoom}");
            zoom += ZOOM_STEP;
        }
    }

    #[test]
    fn test_device_includes_base_scale() {
        let transform = ViewTransform::new(1.0);
        let (x, y) = transform.to_device(&PageCoordinate::new(10.0, 20.0));
        assert_eq!(x, 20.0);
        assert_eq!(y, 40.0);
    }

    #[test]
    fn test_zoom_is_clamped() {
        assert_eq!(ViewTransform::new(10.0).zoom(), MAX_ZOOM);
        assert_eq!(ViewTransform::new(0.0).zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_zoom_stepping() {
        assert_eq!(zoom_in(1.0), 1.25);
        assert_eq!(zoom_out(1.0), 0.75);
        assert_eq!(zoom_in(MAX_ZOOM), MAX_ZOOM);
        assert_eq!(zoom_out(MIN_ZOOM), MIN_ZOOM);
    }

    #[test]
    fn test_rect_transforms_corner_wise() {
        let transform = ViewTransform::new(1.5);
        let rect = transform.rect_to_canonical((30.0, 90.0), (9.0, 15.0));
        assert!((rect.x1() - 3.0).abs() < 1e-4);
        assert!((rect.y1() - 5.0).abs() < 1e-4);
        assert!((rect.x2() - 10.0).abs() < 1e-4);
        assert!((rect.y2() - 30.0).abs() < 1e-4);

        let (x1, y1, x2, y2) = transform.rect_to_device(&rect);
        assert!((x1 - 9.0).abs() < 1e-3);
        assert!((y1 - 15.0).abs() < 1e-3);
        assert!((x2 - 30.0).abs() < 1e-3);
        assert!((y2 - 90.0).abs() < 1e-3);
    }
}
