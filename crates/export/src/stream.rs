//! PDF content-stream generation for annotation overlays
//!
//! Produces the raw path operations that draw stored annotations onto a page:
//! acceptance marks as Bezier-approximated circles, defect marks as stroked
//! rectangles, at a fixed line width. Input geometry is canonical (top-left
//! origin); PDF drawing space has its origin at the bottom-left, so all Y
//! values are flipped against the page height here.

use std::fmt::Write as FmtWrite;

use inspector_core::{Annotation, AnnotationKind};

use crate::ExportError;

/// Fixed stroke width for burned-in marks, in points
pub const EXPORT_STROKE_WIDTH: f32 = 2.0;

/// Stroke colors per kind, normalized RGB
pub const ACCEPTANCE_RGB: (f32, f32, f32) = (0.0, 0.63, 0.0);
pub const DEFECT_RGB: (f32, f32, f32) = (0.9, 0.49, 0.13);

/// Magic number for approximating a circle quadrant with one Bezier curve
const KAPPA: f32 = 0.552_284_8;

/// Content stream drawing every given annotation onto one page
pub fn page_overlay_stream(
    annotations: &[&Annotation],
    page_height: f32,
) -> Result<String, ExportError> {
    let mut stream = String::new();
    for annotation in annotations {
        write_annotation(&mut stream, annotation, page_height)?;
    }
    Ok(stream)
}

fn write_annotation(
    stream: &mut String,
    annotation: &Annotation,
    page_height: f32,
) -> std::fmt::Result {
    let rect = annotation.rect();
    match annotation.kind() {
        AnnotationKind::Acceptance => {
            let (r, g, b) = ACCEPTANCE_RGB;
            writeln!(stream, "{} {} {} RG", r, g, b)?;
            writeln!(stream, "{} w", EXPORT_STROKE_WIDTH)?;

            let center = rect.center();
            let cx = center.x;
            let cy = page_height - center.y;
            write_circle(stream, cx, cy, rect.circle_radius())?;
        }
        AnnotationKind::Defect { .. } => {
            let (r, g, b) = DEFECT_RGB;
            writeln!(stream, "{} {} {} RG", r, g, b)?;
            writeln!(stream, "{} w", EXPORT_STROKE_WIDTH)?;

            // Flipping Y swaps which canonical edge is the PDF bottom
            let x = rect.x1();
            let y = page_height - rect.y2();
            writeln!(stream, "{} {} {} {} re", x, y, rect.width(), rect.height())?;
            writeln!(stream, "S")?;
        }
    }
    Ok(())
}

/// Four-curve Bezier circle, stroked
fn write_circle(stream: &mut String, cx: f32, cy: f32, radius: f32) -> std::fmt::Result {
    let r = radius;
    let k = r * KAPPA;

    writeln!(stream, "{} {} m", cx + r, cy)?;
    writeln!(stream, "{} {} {} {} {} {} c", cx + r, cy + k, cx + k, cy + r, cx, cy + r)?;
    writeln!(stream, "{} {} {} {} {} {} c", cx - k, cy + r, cx - r, cy + k, cx - r, cy)?;
    writeln!(stream, "{} {} {} {} {} {} c", cx - r, cy - k, cx - k, cy - r, cx, cy - r)?;
    writeln!(stream, "{} {} {} {} {} {} c", cx + k, cy - r, cx + r, cy - k, cx + r, cy)?;
    writeln!(stream, "s")?;
    Ok(())
}
