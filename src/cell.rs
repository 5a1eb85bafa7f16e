use std::fmt;

use calamine::Data;
use chrono::{NaiveDateTime, Timelike};

/// Type tag of a [`TypedCellValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Blank,
    Text,
    Number,
    Boolean,
    Date,
    Error,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellKind::Blank => "Blank",
            CellKind::Text => "Text",
            CellKind::Number => "Number",
            CellKind::Boolean => "Boolean",
            CellKind::Date => "DateTime",
            CellKind::Error => "Error",
        };
        f.write_str(name)
    }
}

/// A config cell value together with its type.
///
/// `Display` renders the text that is substituted into template cells.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedCellValue {
    Blank,
    Text(String),
    Number(f64),
    Boolean(bool),
    Date(NaiveDateTime),
    Error(String),
}

impl TypedCellValue {
    pub fn kind(&self) -> CellKind {
        match self {
            TypedCellValue::Blank => CellKind::Blank,
            TypedCellValue::Text(_) => CellKind::Text,
            TypedCellValue::Number(_) => CellKind::Number,
            TypedCellValue::Boolean(_) => CellKind::Boolean,
            TypedCellValue::Date(_) => CellKind::Date,
            TypedCellValue::Error(_) => CellKind::Error,
        }
    }

    /// True for empty cells and for text cells holding an empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            TypedCellValue::Blank => true,
            TypedCellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for TypedCellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedCellValue::Blank => Ok(()),
            TypedCellValue::Text(s) => f.write_str(s),
            TypedCellValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{n:.0}")
                } else {
                    write!(f, "{n}")
                }
            }
            TypedCellValue::Boolean(true) => f.write_str("TRUE"),
            TypedCellValue::Boolean(false) => f.write_str("FALSE"),
            TypedCellValue::Date(dt) => {
                if dt.num_seconds_from_midnight() == 0 && dt.nanosecond() == 0 {
                    write!(f, "{}", dt.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S"))
                }
            }
            TypedCellValue::Error(e) => f.write_str(e),
        }
    }
}

impl From<&Data> for TypedCellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => TypedCellValue::Blank,
            Data::String(s) => TypedCellValue::Text(s.clone()),
            Data::Float(n) => TypedCellValue::Number(*n),
            Data::Int(n) => TypedCellValue::Number(*n as f64),
            Data::Bool(b) => TypedCellValue::Boolean(*b),
            Data::Error(e) => TypedCellValue::Error(e.to_string()),
            Data::DateTime(dt) => {
                if dt.is_duration() {
                    return TypedCellValue::Number(dt.as_f64());
                }
                match dt.as_datetime() {
                    Some(value) => TypedCellValue::Date(value),
                    None => TypedCellValue::Number(dt.as_f64()),
                }
            }
            Data::DateTimeIso(s) => match parse_iso_datetime(s) {
                Some(value) => TypedCellValue::Date(value),
                None => TypedCellValue::Text(s.clone()),
            },
            Data::DurationIso(s) => TypedCellValue::Text(s.clone()),
        }
    }
}

fn parse_iso_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| {
            chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .ok()
}
