//! Source document metadata
//!
//! The narrow read-only view of the paginated document the core needs:
//! page count and per-page canonical dimensions.

use std::path::{Path, PathBuf};

use pdfium_render::prelude::*;

use crate::ExportError;

/// Page dimensions in canonical units (points)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDimensions {
    pub width: f32,
    pub height: f32,
}

/// Metadata of a loaded source document
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub file_path: PathBuf,
    pub page_count: u16,
    pub page_dimensions: Vec<PageDimensions>,
}

impl DocumentInfo {
    pub fn dimensions(&self, page_index: u16) -> Option<PageDimensions> {
        self.page_dimensions.get(page_index as usize).copied()
    }
}

/// Open a PDF just far enough to read page count and sizes
pub fn read_document_info(path: &Path) -> Result<DocumentInfo, ExportError> {
    let pdfium = Pdfium::new(
        Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| ExportError::Pdf(e.to_string()))?,
    );

    let document = pdfium
        .load_pdf_from_file(path, None)
        .map_err(|e| ExportError::Load(e.to_string()))?;

    let mut page_dimensions = Vec::new();
    for page in document.pages().iter() {
        page_dimensions.push(PageDimensions {
            width: page.width().value,
            height: page.height().value,
        });
    }

    Ok(DocumentInfo {
        file_path: path.to_path_buf(),
        page_count: page_dimensions.len() as u16,
        page_dimensions,
    })
}
