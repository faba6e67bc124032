use std::fmt::{self, Display, Formatter};

use chrono::{NaiveDateTime, NaiveTime};

/// Strings that CSV input treats as a missing value.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// One value of a table.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl Cell {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Turns a float with no fractional part into an integer cell.
    #[must_use]
    pub(crate) fn from_spreadsheet_float(value: f64) -> Self {
        match integral_f64(value) {
            Some(int) => Self::Int(int),
            None => Self::Float(value),
        }
    }

    pub(crate) fn key(&self) -> CellKey<'_> {
        match self {
            Self::Empty => CellKey::Empty,
            Self::Bool(value) => CellKey::Bool(*value),
            Self::Int(value) => CellKey::Int(*value),
            Self::Float(value) => match integral_f64(*value) {
                Some(int) => CellKey::Int(int),
                // -0.0 was folded into Int(0) above; all NaNs share one key.
                None if value.is_nan() => CellKey::Float(f64::NAN.to_bits()),
                None => CellKey::Float(value.to_bits()),
            },
            Self::Text(value) => CellKey::Text(value),
            Self::DateTime(value) => CellKey::DateTime(*value),
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write_float(f, *value),
            Self::Text(value) => f.write_str(value),
            Self::DateTime(value) if value.time() == NaiveTime::MIN => {
                write!(f, "{}", value.format("%Y-%m-%d"))
            }
            Self::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

fn write_float(f: &mut Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        return Ok(());
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "inf" } else { "-inf" });
    }
    if value.fract() == 0.0 && value.abs() < 1e16 {
        return write!(f, "{value:.1}");
    }
    write!(f, "{value}")
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integral_f64(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.007_199_254_740_992e15 {
        Some(value as i64)
    } else {
        None
    }
}

/// Hashable identity of a cell used for duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum CellKey<'a> {
    Empty,
    Bool(bool),
    Int(i64),
    Float(u64),
    Text(&'a str),
    DateTime(NaiveDateTime),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Bool,
    Text,
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "True" | "TRUE" | "true" => Some(true),
        "False" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}

fn is_missing(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw)
}

fn classify(raw: &str) -> ColumnKind {
    if raw.parse::<i64>().is_ok() {
        ColumnKind::Int
    } else if raw.parse::<f64>().is_ok() {
        ColumnKind::Float
    } else if parse_bool(raw).is_some() {
        ColumnKind::Bool
    } else {
        ColumnKind::Text
    }
}

fn widen(current: Option<ColumnKind>, next: ColumnKind) -> ColumnKind {
    match (current, next) {
        (None, kind) => kind,
        (Some(current), next) if current == next => current,
        (Some(ColumnKind::Int), ColumnKind::Float) | (Some(ColumnKind::Float), ColumnKind::Int) => {
            ColumnKind::Float
        }
        _ => ColumnKind::Text,
    }
}

/// Infers one type for a whole column of raw CSV fields.
pub(crate) fn infer_column(raw: &[&str]) -> Vec<Cell> {
    let mut inferred = None;
    for value in raw.iter().copied().filter(|value| !is_missing(value)) {
        let kind = widen(inferred, classify(value));
        inferred = Some(kind);
        if kind == ColumnKind::Text {
            break;
        }
    }
    let kind = inferred.unwrap_or(ColumnKind::Text);

    raw.iter()
        .map(|value| {
            if is_missing(value) {
                return Cell::Empty;
            }
            match kind {
                ColumnKind::Int => value.parse().map_or(Cell::Empty, Cell::Int),
                ColumnKind::Float => value.parse().map_or(Cell::Empty, Cell::Float),
                ColumnKind::Bool => parse_bool(value).map_or(Cell::Empty, Cell::Bool),
                ColumnKind::Text => Cell::text(*value),
            }
        })
        .collect()
}
