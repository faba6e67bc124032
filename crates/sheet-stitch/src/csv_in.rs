use std::borrow::Cow;

use csv::{ReaderBuilder, StringRecord};
use encoding_rs::Encoding;

use crate::cell::{Cell, infer_column};
use crate::error::ReadError;
use crate::header::normalize_headers;
use crate::model::ParsedTable;
use crate::options::StitchOptions;

fn decode<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Result<Cow<'a, str>, ReadError> {
    let body = match Encoding::for_bom(bytes) {
        Some((bom_encoding, bom_len)) if bom_encoding == encoding => &bytes[bom_len..],
        _ => bytes,
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or(ReadError::Decode {
            encoding: encoding.name(),
        })
}

/// Reads the first record as the header and infers a type for every column.
pub(crate) fn read_csv_table(
    name: &str,
    bytes: &[u8],
    options: &StitchOptions,
) -> Result<ParsedTable, ReadError> {
    let text = decode(bytes, options.csv_encoding)?;
    let mut reader = ReaderBuilder::new()
        .delimiter(options.csv_delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let header = records.next().transpose()?.ok_or(ReadError::Empty)?;
    let headers = normalize_headers(header.iter());
    let width = headers.len();

    let mut raw_rows: Vec<StringRecord> = Vec::new();
    for record in records {
        let record = record?;
        if record.len() > width {
            return Err(ReadError::RaggedRow {
                line: record.position().map_or(0, csv::Position::line),
                expected: width,
                found: record.len(),
            });
        }
        raw_rows.push(record);
    }

    let columns = (0..width)
        .map(|column| {
            let raw = raw_rows
                .iter()
                .map(|record| record.get(column).unwrap_or(""))
                .collect::<Vec<_>>();
            infer_column(&raw)
        })
        .collect::<Vec<_>>();

    Ok(ParsedTable {
        source: name.to_string(),
        headers,
        rows: transpose(columns, raw_rows.len()),
    })
}

fn transpose(columns: Vec<Vec<Cell>>, row_count: usize) -> Vec<Vec<Cell>> {
    let mut column_iters = columns.into_iter().map(Vec::into_iter).collect::<Vec<_>>();
    (0..row_count)
        .map(|_| {
            column_iters
                .iter_mut()
                .map(|cells| cells.next().unwrap_or_default())
                .collect()
        })
        .collect()
}
