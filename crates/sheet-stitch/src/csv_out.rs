use std::io;
use std::path::Path;

use csv::WriterBuilder;

use crate::error::StitchError;
use crate::model::CombinedTable;
use crate::options::ExportOptions;

pub const EXPORT_FILE_NAME: &str = "stitched_data.csv";
pub const EXPORT_MIME_TYPE: &str = "text/csv";

fn write_records<W: io::Write>(
    writer: &mut csv::Writer<W>,
    table: &CombinedTable,
    options: &ExportOptions,
) -> Result<(), StitchError> {
    if options.include_index {
        writer.write_field("")?;
    }
    writer.write_record(&table.headers)?;

    for (index, row) in table.rows.iter().enumerate() {
        if options.include_index {
            writer.write_field(index.to_string())?;
        }
        writer.write_record(row.iter().map(ToString::to_string))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv(
    path: &Path,
    table: &CombinedTable,
    options: &ExportOptions,
) -> Result<(), StitchError> {
    options.validate()?;
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_path(path)?;
    write_records(&mut writer, table, options)
}

/// Renders the table as UTF-8 CSV bytes.
pub fn to_csv_bytes(table: &CombinedTable, options: &ExportOptions) -> Result<Vec<u8>, StitchError> {
    options.validate()?;
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(Vec::<u8>::new());
    write_records(&mut writer, table, options)?;

    writer
        .into_inner()
        .map_err(|error| StitchError::Io(error.into_error()))
}
