use std::str::FromStr;

use encoding_rs::{Encoding, UTF_8};

use crate::error::StitchError;

/// Reader chosen for an uploaded file, decided by filename suffix only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xls,
    Xlsx,
}

impl FileFormat {
    #[must_use]
    pub fn from_file_name(name: &str) -> Self {
        let lowered = name.trim().to_ascii_lowercase();
        if lowered.ends_with(".xlsx") {
            Self::Xlsx
        } else if lowered.ends_with(".xls") {
            Self::Xls
        } else {
            Self::Csv
        }
    }

    #[must_use]
    pub const fn is_spreadsheet(self) -> bool {
        matches!(self, Self::Xls | Self::Xlsx)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StitchOptions {
    pub deduplicate: bool,
    pub csv_delimiter: u8,
    pub csv_encoding: &'static Encoding,
}

impl StitchOptions {
    #[must_use]
    pub fn deduplicated(deduplicate: bool) -> Self {
        Self {
            deduplicate,
            ..Self::default()
        }
    }
}

impl StitchOptions {
    pub(crate) fn validate(&self) -> Result<(), StitchError> {
        check_delimiter("input delimiter", self.csv_delimiter)
    }
}

impl Default for StitchOptions {
    fn default() -> Self {
        Self {
            deduplicate: false,
            csv_delimiter: b',',
            csv_encoding: UTF_8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExportOptions {
    pub delimiter: u8,
    pub include_index: bool,
}

impl ExportOptions {
    pub(crate) fn validate(&self) -> Result<(), StitchError> {
        check_delimiter("output delimiter", self.delimiter)
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            include_index: false,
        }
    }
}

fn check_delimiter(what: &str, delimiter: u8) -> Result<(), StitchError> {
    if matches!(delimiter, b'"' | b'\n' | b'\r') || !delimiter.is_ascii() {
        return Err(StitchError::InvalidOption(format!(
            "{what} {:?} cannot separate CSV fields",
            char::from(delimiter)
        )));
    }
    Ok(())
}

/// Parses an encoding label such as `utf-8`, `big5` or `windows-1252`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingLabel(pub &'static Encoding);

impl FromStr for EncodingLabel {
    type Err = String;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Encoding::for_label(label.trim().as_bytes())
            .map(Self)
            .ok_or_else(|| format!("unknown encoding label: '{label}'"))
    }
}
