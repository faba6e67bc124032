use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::cell::Cell;
use crate::csv_out::to_csv_bytes;
use crate::error::StitchError;
use crate::model::CombinedTable;
use crate::options::ExportOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportCacheStatus {
    Hit,
    Miss,
}

impl ExportCacheStatus {
    pub const fn as_header_value(self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
        }
    }
}

const fn cell_tag(cell: &Cell) -> u8 {
    match cell {
        Cell::Empty => 0,
        Cell::Bool(_) => 1,
        Cell::Int(_) => 2,
        Cell::Float(_) => 3,
        Cell::Text(_) => 4,
        Cell::DateTime(_) => 5,
    }
}

fn update_field(hasher: &mut Sha256, tag: u8, bytes: &[u8]) {
    hasher.update([tag]);
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

/// Hex SHA-256 over column names and every typed cell.
#[must_use]
pub fn table_digest(table: &CombinedTable) -> String {
    let mut hasher = Sha256::new();
    hasher.update((table.headers.len() as u64).to_le_bytes());
    for header in &table.headers {
        update_field(&mut hasher, u8::MAX, header.as_bytes());
    }

    hasher.update((table.rows.len() as u64).to_le_bytes());
    for row in &table.rows {
        for cell in row {
            update_field(&mut hasher, cell_tag(cell), cell.to_string().as_bytes());
        }
    }

    hex::encode(hasher.finalize())
}

/// CSV bytes for one table, tagged with the table digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub digest: String,
    pub bytes: Arc<[u8]>,
}

#[derive(Debug, Clone)]
struct CachedExport {
    options: ExportOptions,
    export: CsvExport,
}

/// Memoizes the most recent table-to-CSV conversion.
#[derive(Debug, Clone, Default)]
pub struct CsvExportCache {
    entry: Option<CachedExport>,
}

impl CsvExportCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_convert(
        &mut self,
        table: &CombinedTable,
        options: &ExportOptions,
    ) -> Result<(CsvExport, ExportCacheStatus), StitchError> {
        let digest = table_digest(table);
        if let Some(cached) = &self.entry
            && cached.export.digest == digest
            && cached.options == *options
        {
            tracing::debug!(digest = %digest, "csv export cache hit");
            return Ok((cached.export.clone(), ExportCacheStatus::Hit));
        }

        let bytes = to_csv_bytes(table, options)?;
        let export = CsvExport {
            digest,
            bytes: Arc::from(bytes),
        };
        tracing::debug!(digest = %export.digest, bytes = export.bytes.len(), "csv export cache miss");

        self.entry = Some(CachedExport {
            options: *options,
            export: export.clone(),
        });
        Ok((export, ExportCacheStatus::Miss))
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
