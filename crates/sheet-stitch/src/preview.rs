use std::fmt::Write as _;

use crate::model::CombinedTable;

/// The first rows of a combined table, rendered to strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePreview {
    pub headers: Vec<String>,
    pub rows: Vec<PreviewRow>,
    pub total_rows: usize,
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow {
    pub index: usize,
    pub cells: Vec<String>,
}

impl TablePreview {
    #[must_use]
    pub fn new(table: &CombinedTable, limit: usize) -> Self {
        let rows = table
            .rows
            .iter()
            .take(limit)
            .enumerate()
            .map(|(index, row)| PreviewRow {
                index,
                cells: row.iter().map(ToString::to_string).collect(),
            })
            .collect::<Vec<_>>();

        Self {
            headers: table.headers.clone(),
            truncated: table.row_count() > rows.len(),
            total_rows: table.row_count(),
            rows,
        }
    }

    /// Aligned plain-text table with the row index in the first column.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut widths = self
            .headers
            .iter()
            .map(|header| header.chars().count())
            .collect::<Vec<_>>();
        let mut index_width = 0;
        for row in &self.rows {
            index_width = index_width.max(row.index.to_string().len());
            for (width, cell) in widths.iter_mut().zip(&row.cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let _ = write!(out, "{:index_width$}", "");
        for (header, width) in self.headers.iter().zip(&widths) {
            let _ = write!(out, "  {header:<width$}");
        }
        out.push('\n');

        for row in &self.rows {
            let _ = write!(out, "{:>index_width$}", row.index);
            for (cell, width) in row.cells.iter().zip(&widths) {
                let _ = write!(out, "  {cell:<width$}");
            }
            out.push('\n');
        }

        if self.truncated {
            let _ = writeln!(out, "... {} of {} rows shown", self.rows.len(), self.total_rows);
        }
        out
    }
}
