use std::io;

use thiserror::Error;

use crate::report::SkippedFile;

/// Failure to read one uploaded file. Recoverable: the file is skipped.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to open workbook: {0}")]
    Workbook(String),

    #[error("workbook contains no worksheets")]
    NoWorksheet,

    #[error("content is not valid {encoding} text")]
    Decode { encoding: &'static str },

    #[error("no columns to parse from file")]
    Empty,

    #[error("expected {expected} fields in line {line}, saw {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
}

/// Structural problems that make a set of tables impossible to concatenate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConcatError {
    #[error("table '{table}' has column '{column}' more than once")]
    DuplicateColumn { table: String, column: String },

    #[error("table '{table}' row {row} has {found} cells, expected {expected}")]
    RowWidth {
        table: String,
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Error)]
pub enum StitchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no valid input: none of the {} provided file(s) could be read", skipped.len())]
    NoValidInput { skipped: Vec<SkippedFile> },

    #[error("failed to stitch spreadsheets: {0}")]
    Concatenation(#[from] ConcatError),

    #[error("invalid option: {0}")]
    InvalidOption(String),
}
