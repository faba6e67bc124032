use std::collections::{HashMap, HashSet};

use crate::cell::Cell;
use crate::error::ConcatError;
use crate::model::{CombinedTable, ParsedTable};

fn validate_table(table: &ParsedTable) -> Result<(), ConcatError> {
    let mut seen = HashSet::with_capacity(table.headers.len());
    for header in &table.headers {
        if !seen.insert(header.as_str()) {
            return Err(ConcatError::DuplicateColumn {
                table: table.source.clone(),
                column: header.clone(),
            });
        }
    }

    let expected = table.headers.len();
    if let Some((row, cells)) = table
        .rows
        .iter()
        .enumerate()
        .find(|(_, cells)| cells.len() != expected)
    {
        return Err(ConcatError::RowWidth {
            table: table.source.clone(),
            row,
            expected,
            found: cells.len(),
        });
    }

    Ok(())
}

/// Appends tables row-wise, aligning columns by name in first-seen order.
pub(crate) fn concat_tables(tables: Vec<ParsedTable>) -> Result<CombinedTable, ConcatError> {
    for table in &tables {
        validate_table(table)?;
    }

    let mut headers = Vec::new();
    let mut positions = HashMap::new();
    for table in &tables {
        for header in &table.headers {
            if !positions.contains_key(header) {
                positions.insert(header.clone(), headers.len());
                headers.push(header.clone());
            }
        }
    }

    let width = headers.len();
    let mut rows = Vec::with_capacity(tables.iter().map(ParsedTable::row_count).sum());
    for table in tables {
        let targets = table
            .headers
            .iter()
            .map(|header| positions[header])
            .collect::<Vec<_>>();

        for cells in table.rows {
            let mut row = vec![Cell::Empty; width];
            for (cell, &target) in cells.into_iter().zip(&targets) {
                row[target] = cell;
            }
            rows.push(row);
        }
    }

    widen_numeric_columns(&mut rows, width);
    Ok(CombinedTable { headers, rows })
}

/// Promotes integers to floats in columns that hold both.
#[allow(clippy::cast_precision_loss)]
fn widen_numeric_columns(rows: &mut [Vec<Cell>], width: usize) {
    for column in 0..width {
        let mut has_int = false;
        let mut has_float = false;
        let mut has_other = false;
        for row in rows.iter() {
            match row[column] {
                Cell::Int(_) => has_int = true,
                Cell::Float(_) => has_float = true,
                Cell::Empty => {}
                _ => has_other = true,
            }
        }

        if !(has_int && has_float) || has_other {
            continue;
        }

        for row in rows.iter_mut() {
            if let Cell::Int(value) = row[column] {
                row[column] = Cell::Float(value as f64);
            }
        }
    }
}
