use std::fs;
use std::io;
use std::path::Path;

use crate::cell::Cell;

/// A named byte stream handed over by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Reads a file from disk, naming it after the final path component.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let content = fs::read(path)?;
        let name = path.file_name().map_or_else(
            || path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        Ok(Self { name, content })
    }
}

/// One file's worth of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    pub source: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ParsedTable {
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// The stitched result. Row positions double as the dense 0-based index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CombinedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl CombinedTable {
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up a cell by row position and column name.
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.headers.iter().position(|header| header == column)?;
        self.rows.get(row).and_then(|cells| cells.get(index))
    }
}
