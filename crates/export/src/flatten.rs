//! Burn-in export via pdfium
//!
//! Writes a new copy of the source PDF with every stored annotation drawn
//! into the page content as vector path objects. Geometry is canonical, so
//! the output is identical whatever zoom the marks were captured at. The
//! source document is never modified.

use std::collections::HashMap;
use std::path::Path;

use inspector_core::{Annotation, AnnotationKind};
use pdfium_render::prelude::*;

use crate::stream::{ACCEPTANCE_RGB, DEFECT_RGB, EXPORT_STROKE_WIDTH};
use crate::ExportError;

pub type ExportResult<T> = Result<T, ExportError>;

/// Initialize the pdfium library binding
fn init_pdfium() -> ExportResult<Pdfium> {
    Ok(Pdfium::new(
        Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| ExportError::Pdf(e.to_string()))?,
    ))
}

fn stroke_color((r, g, b): (f32, f32, f32)) -> PdfColor {
    PdfColor::new((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8, 255)
}

/// Draw one annotation into a page as a path object
///
/// Canonical Y grows downward from the top-left; PDF rect values grow upward
/// from the bottom-left, hence the flips against `page_height`.
fn add_annotation_to_page(
    page: &mut PdfPage<'_>,
    annotation: &Annotation,
    page_height: f32,
) -> ExportResult<()> {
    let rect = annotation.rect();
    let width = PdfPoints::new(EXPORT_STROKE_WIDTH);

    match annotation.kind() {
        AnnotationKind::Acceptance => {
            let center = rect.center();
            let radius = rect.circle_radius();
            let bounds = PdfRect::new_from_values(
                page_height - center.y - radius, // bottom
                center.x - radius,               // left
                page_height - center.y + radius, // top
                center.x + radius,               // right
            );

            let obj = page
                .objects_mut()
                .create_path_object_ellipse(
                    bounds,
                    Some(stroke_color(ACCEPTANCE_RGB)),
                    Some(width),
                    None,
                )
                .map_err(|e| ExportError::Pdf(e.to_string()))?;
            drop(obj);
        }
        AnnotationKind::Defect { .. } => {
            let bounds = PdfRect::new_from_values(
                page_height - rect.y2(), // bottom
                rect.x1(),               // left
                page_height - rect.y1(), // top
                rect.x2(),               // right
            );

            let obj = page
                .objects_mut()
                .create_path_object_rect(
                    bounds,
                    Some(stroke_color(DEFECT_RGB)),
                    Some(width),
                    None,
                )
                .map_err(|e| ExportError::Pdf(e.to_string()))?;
            drop(obj);
        }
    }

    Ok(())
}

/// Write an annotated copy of `source` to `output`
///
/// Non-destructive: the source file and the in-memory store are untouched.
/// Fails with a recoverable error if the destination cannot be written; no
/// partial output is left usable in that case.
pub fn export_annotated_pdf(
    source: &Path,
    output: &Path,
    annotations: &[Annotation],
) -> ExportResult<()> {
    let pdfium = init_pdfium()?;
    let mut document = pdfium
        .load_pdf_from_file(source, None)
        .map_err(|e| ExportError::Load(e.to_string()))?;

    let mut by_page: HashMap<u16, Vec<&Annotation>> = HashMap::new();
    for annotation in annotations {
        by_page
            .entry(annotation.page_index())
            .or_default()
            .push(annotation);
    }

    for (page_index, page_annotations) in by_page {
        let Ok(mut page) = document.pages_mut().get(page_index) else {
            log::warn!("annotation on page {page_index} beyond the document; skipped");
            continue;
        };
        let page_height = page.height().value;

        for annotation in page_annotations {
            add_annotation_to_page(&mut page, annotation, page_height)?;
        }

        page.regenerate_content()
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
    }

    document
        .save_to_file(output)
        .map_err(|e| ExportError::Io(std::io::Error::other(e.to_string())))?;

    Ok(())
}
