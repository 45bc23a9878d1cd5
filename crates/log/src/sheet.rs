//! Fixed-layout tabular log sheet
//!
//! The inspection log is a sheet with a header block (project, order,
//! cabinet) above a data region that starts at a fixed row and uses fixed
//! columns. The sheet is modeled as an in-memory grid of cells and loaded or
//! saved whole; the CSV file on disk is the external collaborator.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

/// First data row; everything above is the header block
pub const DATA_START_ROW: usize = 4;

/// Fixed data-region columns
pub const COL_SEQUENCE: usize = 0;
/// Reference column, left blank by design
pub const COL_REFERENCE: usize = 1;
pub const COL_DESCRIPTION: usize = 2;
pub const COL_CATEGORY: usize = 3;
pub const COL_INSPECTOR: usize = 4;
pub const COL_DATE: usize = 5;

pub const COLUMN_COUNT: usize = 6;

/// Error types for sheet IO
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type SheetResult<T> = Result<T, SheetError>;

/// In-memory grid of string cells
///
/// Rows and columns grow on demand; absent cells read as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogSheet {
    rows: Vec<Vec<String>>,
}

impl LogSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell contents, empty string for cells that were never written
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn is_cell_empty(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).trim().is_empty()
    }

    /// Write a cell, growing the grid as needed
    pub fn set_cell(&mut self, row: usize, col: usize, value: impl Into<String>) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, String::new());
        }
        cells[col] = value.into();
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Load a sheet from a CSV file; a missing file yields an empty sheet
    pub fn load(path: &Path) -> SheetResult<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let file = File::open(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self { rows })
    }

    /// Persist the whole sheet, padding every row to the fixed column count
    pub fn save(&self, path: &Path) -> SheetResult<()> {
        let file = File::create(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(BufWriter::new(file));

        for row in &self.rows {
            let mut record: Vec<&str> = row.iter().map(String::as_str).collect();
            while record.len() < COLUMN_COUNT {
                record.push("");
            }
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}
