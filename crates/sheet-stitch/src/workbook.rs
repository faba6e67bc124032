use std::fmt::Display;
use std::io::{Cursor, Read, Seek};

use calamine::{Data, Range, Reader, Xls, Xlsx};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::cell::Cell;
use crate::error::ReadError;
use crate::header::normalize_headers;
use crate::model::ParsedTable;
use crate::options::FileFormat;

fn first_sheet<W, RS>(reader: RS) -> Result<Range<Data>, ReadError>
where
    RS: Read + Seek,
    W: Reader<RS>,
    W::Error: Display,
{
    let mut workbook = W::new(reader).map_err(|error| ReadError::Workbook(error.to_string()))?;
    workbook
        .worksheet_range_at(0)
        .ok_or(ReadError::NoWorksheet)?
        .map_err(|error| ReadError::Workbook(error.to_string()))
}

fn parse_iso_datetime(raw: &str) -> Option<NaiveDateTime> {
    raw.parse::<NaiveDateTime>().ok().or_else(|| {
        raw.parse::<NaiveDate>()
            .ok()
            .map(|date| date.and_time(NaiveTime::MIN))
    })
}

fn to_cell(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::String(text) if text.is_empty() => Cell::Empty,
        Data::String(text) => Cell::text(text.clone()),
        Data::Float(number) => Cell::from_spreadsheet_float(*number),
        Data::Int(number) => Cell::Int(*number),
        Data::Bool(flag) => Cell::Bool(*flag),
        Data::DateTime(datetime) => datetime.as_datetime().map_or_else(
            || Cell::from_spreadsheet_float(datetime.as_f64()),
            Cell::DateTime,
        ),
        Data::DateTimeIso(raw) => {
            parse_iso_datetime(raw).map_or_else(|| Cell::text(raw.clone()), Cell::DateTime)
        }
        Data::DurationIso(raw) => Cell::text(raw.clone()),
        Data::Error(error) => Cell::text(error.to_string()),
    }
}

/// Reads the first worksheet; its first row is the header.
pub(crate) fn read_workbook_table(
    name: &str,
    bytes: &[u8],
    format: FileFormat,
) -> Result<ParsedTable, ReadError> {
    let cursor = Cursor::new(bytes);
    let range = match format {
        FileFormat::Xls => first_sheet::<Xls<_>, _>(cursor)?,
        FileFormat::Xlsx | FileFormat::Csv => first_sheet::<Xlsx<_>, _>(cursor)?,
    };

    let mut sheet_rows = range.rows();
    let header = sheet_rows.next().ok_or(ReadError::Empty)?;
    let headers = normalize_headers(header.iter().map(|value| to_cell(value).to_string()));
    let width = headers.len();

    let rows = sheet_rows
        .map(|row| {
            let mut cells = row.iter().map(to_cell).collect::<Vec<_>>();
            cells.resize(width, Cell::Empty);
            cells
        })
        .filter(|cells| !cells.iter().all(Cell::is_empty))
        .collect();

    Ok(ParsedTable {
        source: name.to_string(),
        headers,
        rows,
    })
}
