//! Circuit Inspector Log Library
//!
//! Append-only tabular defect log: fixed-layout sheet model, sequence-number
//! continuation, and row allocation against the CSV log file.

pub mod sheet;
pub mod writer;

pub use sheet::{
    LogSheet, SheetError, COLUMN_COUNT, COL_CATEGORY, COL_DATE, COL_DESCRIPTION, COL_INSPECTOR,
    COL_REFERENCE, COL_SEQUENCE, DATA_START_ROW,
};
pub use writer::{LogError, LogWriter};
