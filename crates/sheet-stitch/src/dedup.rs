use std::collections::HashSet;

use crate::cell::Cell;
use crate::model::CombinedTable;

impl CombinedTable {
    /// Removes rows equal to an earlier row across every column, keeping the
    /// first occurrence and the order of the survivors. Returns how many rows
    /// were removed.
    pub fn drop_duplicates(&mut self) -> usize {
        let before = self.rows.len();
        let keep = {
            let mut seen = HashSet::with_capacity(before);
            self.rows
                .iter()
                .map(|row| seen.insert(row.iter().map(Cell::key).collect::<Vec<_>>()))
                .collect::<Vec<_>>()
        };

        let mut flags = keep.into_iter();
        self.rows.retain(|_| flags.next().unwrap_or(true));
        before - self.rows.len()
    }
}
