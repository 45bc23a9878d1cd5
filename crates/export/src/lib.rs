//! Circuit Inspector Export Library
//!
//! Re-projects stored annotations into per-page vector graphics and burns
//! them into a copy of the source PDF.

pub mod document;
pub mod flatten;
pub mod stream;

/// Error types for export operations
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF load error: {0}")]
    Load(String),

    #[error("PDF generation error: {0}")]
    Pdf(String),

    #[error("stream generation error: {0}")]
    Stream(#[from] std::fmt::Error),
}

pub use document::{read_document_info, DocumentInfo, PageDimensions};
pub use flatten::{export_annotated_pdf, ExportResult};
pub use stream::{page_overlay_stream, EXPORT_STROKE_WIDTH};
