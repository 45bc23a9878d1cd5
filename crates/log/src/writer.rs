//! Append-only defect log writer
//!
//! Allocates rows in the sheet's data region and continues the sequence
//! numbering of whatever the log already contains. The sequence cursor is
//! computed once when the log is opened: rows are scanned from the fixed data
//! offset until the first row with an empty description cell, and the writer
//! continues after the highest sequence value seen.

use std::path::{Path, PathBuf};

use chrono::Local;
use inspector_core::{Annotation, AnnotationKind};

use crate::sheet::{
    LogSheet, SheetError, COL_CATEGORY, COL_DATE, COL_DESCRIPTION, COL_INSPECTOR, COL_SEQUENCE,
    DATA_START_ROW,
};

/// Error types for log operations
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The log file could not be read or written (locked, missing directory,
    /// permissions). Recoverable: the session stays usable and a later
    /// append may succeed.
    #[error("inspection log unavailable: {0}")]
    Unavailable(#[from] SheetError),

    #[error("only defect annotations are logged")]
    NotADefect,
}

pub type LogResult<T> = Result<T, LogError>;

/// Header block layout, rows 0..DATA_START_ROW
const ROW_PROJECT: usize = 0;
const ROW_ORDER: usize = 1;
const ROW_CABINET: usize = 2;
const ROW_CAPTIONS: usize = 3;

/// Writer over one inspection log file
#[derive(Debug)]
pub struct LogWriter {
    path: PathBuf,
    sheet: LogSheet,
    next_sequence: u32,
}

impl LogWriter {
    /// Open (or start) the log at `path` and continue its sequence numbering
    pub fn open(path: impl Into<PathBuf>) -> LogResult<Self> {
        let path = path.into();
        let sheet = LogSheet::load(&path)?;
        let next_sequence = scan_next_sequence(&sheet);
        Ok(Self {
            path,
            sheet,
            next_sequence,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sequence number the next appended defect will receive
    pub fn next_sequence(&self) -> u32 {
        self.next_sequence
    }

    /// One-shot header write: project, order, and cabinet identifiers
    ///
    /// Separate from per-annotation appends; typically called once per
    /// document load.
    pub fn write_header(&mut self, project: &str, order: &str, cabinet: &str) -> LogResult<()> {
        let mut sheet = self.sheet.clone();
        sheet.set_cell(ROW_PROJECT, 0, "Project");
        sheet.set_cell(ROW_PROJECT, 1, project);
        sheet.set_cell(ROW_ORDER, 0, "Order");
        sheet.set_cell(ROW_ORDER, 1, order);
        sheet.set_cell(ROW_CABINET, 0, "Cabinet");
        sheet.set_cell(ROW_CABINET, 1, cabinet);

        sheet.set_cell(ROW_CAPTIONS, COL_SEQUENCE, "No.");
        sheet.set_cell(ROW_CAPTIONS, COL_DESCRIPTION, "Description");
        sheet.set_cell(ROW_CAPTIONS, COL_CATEGORY, "Category");
        sheet.set_cell(ROW_CAPTIONS, COL_INSPECTOR, "Inspector");
        sheet.set_cell(ROW_CAPTIONS, COL_DATE, "Date");

        sheet.save(&self.path)?;
        self.sheet = sheet;
        Ok(())
    }

    /// Append one defect as a row in the first free slot of the data region
    ///
    /// Returns the sequence number written. On failure the in-memory sheet is
    /// left untouched but the sequence cursor has already advanced, so the
    /// caller's next attempt uses the following number; the annotation itself
    /// is never rolled back here. The reference column stays blank by design.
    pub fn append(&mut self, annotation: &Annotation, inspector: &str) -> LogResult<u32> {
        let AnnotationKind::Defect {
            category_id,
            rendered_text,
            ..
        } = annotation.kind()
        else {
            return Err(LogError::NotADefect);
        };

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let row = first_free_row(&self.sheet);
        let mut sheet = self.sheet.clone();
        sheet.set_cell(row, COL_SEQUENCE, sequence.to_string());
        sheet.set_cell(row, COL_DESCRIPTION, rendered_text.clone());
        sheet.set_cell(row, COL_CATEGORY, category_id.clone());
        sheet.set_cell(row, COL_INSPECTOR, inspector);
        sheet.set_cell(row, COL_DATE, Local::now().format("%Y-%m-%d %H:%M:%S").to_string());

        if let Err(e) = sheet.save(&self.path) {
            log::warn!("inspection log write failed: {e}");
            return Err(e.into());
        }
        self.sheet = sheet;
        Ok(sequence)
    }
}

/// First data row whose description cell is empty
fn first_free_row(sheet: &LogSheet) -> usize {
    let mut row = DATA_START_ROW;
    while !sheet.is_cell_empty(row, COL_DESCRIPTION) {
        row += 1;
    }
    row
}

/// Continue after the highest sequence value in the filled data region
fn scan_next_sequence(sheet: &LogSheet) -> u32 {
    let mut max = 0u32;
    let mut row = DATA_START_ROW;
    while !sheet.is_cell_empty(row, COL_DESCRIPTION) {
        if let Ok(value) = sheet.cell(row, COL_SEQUENCE).trim().parse::<u32>() {
            max = max.max(value);
        }
        row += 1;
    }
    max + 1
}
