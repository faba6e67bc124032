mod cell;
mod csv_in;
mod csv_out;
mod dedup;
mod error;
mod export_cache;
mod header;
mod merge;
mod model;
mod options;
mod preview;
mod progress;
mod report;
mod session;
mod workbook;

use tracing::{info, warn};

use crate::csv_in::read_csv_table;
use crate::merge::concat_tables;
use crate::workbook::read_workbook_table;

pub use cell::Cell;
pub use csv_out::{EXPORT_FILE_NAME, EXPORT_MIME_TYPE, to_csv_bytes, write_csv};
pub use error::{ConcatError, ReadError, StitchError};
pub use export_cache::{CsvExport, CsvExportCache, ExportCacheStatus, table_digest};
pub use model::{CombinedTable, ParsedTable, UploadedFile};
pub use options::{EncodingLabel, ExportOptions, FileFormat, StitchOptions};
pub use preview::{PreviewRow, TablePreview};
pub use progress::{Progress, StitchEvent};
pub use report::{ReadFile, SkippedFile, StitchReport};
pub use session::{ButtonState, Download, StitchSession};

/// Parses one uploaded file with the reader its suffix selects.
pub fn read_table(file: &UploadedFile, options: &StitchOptions) -> Result<ParsedTable, ReadError> {
    let format = FileFormat::from_file_name(&file.name);
    if format.is_spreadsheet() {
        read_workbook_table(&file.name, &file.content, format)
    } else {
        read_csv_table(&file.name, &file.content, options)
    }
}

fn emit<P: Progress>(progress: &mut P, event: StitchEvent) {
    if event.is_error() {
        warn!("{event}");
    } else {
        info!("{event}");
    }
    progress.report(&event);
}

/// Stitches `files` in order with default reader options.
pub fn stitch(
    files: &[UploadedFile],
    deduplicate: bool,
) -> Result<(CombinedTable, StitchReport), StitchError> {
    stitch_with_options(files, &StitchOptions::deduplicated(deduplicate), &mut |_: &StitchEvent| {})
}

/// Reads every file, skipping the unreadable ones, then concatenates the rest
/// and optionally drops duplicate rows.
pub fn stitch_with_options<P: Progress>(
    files: &[UploadedFile],
    options: &StitchOptions,
    progress: &mut P,
) -> Result<(CombinedTable, StitchReport), StitchError> {
    options.validate()?;
    emit(progress, StitchEvent::Loading { total: files.len() });

    let mut report = StitchReport::default();
    let mut tables = Vec::with_capacity(files.len());
    for file in files {
        match read_table(file, options) {
            Ok(table) => {
                report.succeeded.push(ReadFile {
                    name: file.name.clone(),
                    rows: table.row_count(),
                });
                emit(
                    progress,
                    StitchEvent::FileRead {
                        name: file.name.clone(),
                        rows: table.row_count(),
                    },
                );
                tables.push(table);
            }
            Err(error) => {
                let skipped = SkippedFile::new(file.name.clone(), error.to_string());
                emit(
                    progress,
                    StitchEvent::FileSkipped {
                        name: skipped.name.clone(),
                        reason: skipped.reason.clone(),
                    },
                );
                report.skipped.push(skipped);
            }
        }
    }

    if tables.is_empty() {
        return Err(StitchError::NoValidInput {
            skipped: report.skipped,
        });
    }

    emit(progress, StitchEvent::Combining { tables: tables.len() });
    let mut combined = concat_tables(tables)?;
    report.rows_before_dedup = combined.row_count();

    if options.deduplicate {
        let removed = combined.drop_duplicates();
        report.duplicates_removed = Some(removed);
        emit(progress, StitchEvent::DuplicatesRemoved { removed });
    }

    emit(
        progress,
        StitchEvent::Finished {
            rows: combined.row_count(),
        },
    );
    Ok((combined, report))
}
