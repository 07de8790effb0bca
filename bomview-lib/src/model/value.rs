//! Resolved attribute values and stored cell values

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

/// Display format for date-time cells.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A value produced by an attribute resolver.
///
/// Resolvers may return dates in whatever form their source stores them;
/// [`AttributeValue::normalize`] turns every date variant into a single UTC
/// date-time before the value is stored in a column.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AttributeValue {
    /// No value; clears the cell.
    #[default]
    None,
    Text(String),
    Integer(i64),
    Number(Decimal),
    Float(f64),
    /// Calendar date, stored as midnight UTC.
    Date(NaiveDate),
    /// Local date-time without offset, interpreted as UTC.
    NaiveDateTime(NaiveDateTime),
    /// Date-time with a known offset.
    DateTime(DateTime<FixedOffset>),
}

impl AttributeValue {
    /// Returns `true` if this is [`AttributeValue::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, AttributeValue::None)
    }

    /// Converts into the stored representation. `None` maps to no cell.
    pub fn normalize(self) -> Option<CellValue> {
        match self {
            AttributeValue::None => None,
            AttributeValue::Text(s) => Some(CellValue::Text(s)),
            AttributeValue::Integer(i) => Some(CellValue::Integer(i)),
            AttributeValue::Number(d) => Some(CellValue::Number(d)),
            AttributeValue::Float(f) => Some(CellValue::Float(f)),
            AttributeValue::Date(d) => Some(CellValue::DateTime(d.and_time(chrono::NaiveTime::MIN).and_utc())),
            AttributeValue::NaiveDateTime(dt) => Some(CellValue::DateTime(dt.and_utc())),
            AttributeValue::DateTime(dt) => Some(CellValue::DateTime(dt.with_timezone(&Utc))),
        }
    }

    /// Returns the text form used when merging aggregated lines.
    pub fn to_text(&self) -> Option<String> {
        self.clone().normalize().map(|v| v.display())
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::Text(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::Text(v)
    }
}

impl From<i32> for AttributeValue {
    fn from(v: i32) -> Self {
        AttributeValue::Integer(i64::from(v))
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Integer(v)
    }
}

impl From<Decimal> for AttributeValue {
    fn from(v: Decimal) -> Self {
        AttributeValue::Number(v)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Float(v)
    }
}

impl From<NaiveDate> for AttributeValue {
    fn from(v: NaiveDate) -> Self {
        AttributeValue::Date(v)
    }
}

impl From<NaiveDateTime> for AttributeValue {
    fn from(v: NaiveDateTime) -> Self {
        AttributeValue::NaiveDateTime(v)
    }
}

impl From<DateTime<FixedOffset>> for AttributeValue {
    fn from(v: DateTime<FixedOffset>) -> Self {
        AttributeValue::DateTime(v)
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(v: DateTime<Utc>) -> Self {
        AttributeValue::DateTime(v.fixed_offset())
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => AttributeValue::None,
        }
    }
}

/// A value stored in a column cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Number(Decimal),
    Float(f64),
    /// Every date-like result is stored in this form so cells sort uniformly.
    DateTime(DateTime<Utc>),
}

impl CellValue {
    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Text(_) => "text",
            CellValue::Integer(_) => "integer",
            CellValue::Number(_) => "number",
            CellValue::Float(_) => "float",
            CellValue::DateTime(_) => "datetime",
        }
    }

    /// Returns the text as displayed in the tree.
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Number(d) => d.normalize().to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::DateTime(dt) => dt.format(DATE_TIME_FORMAT).to_string(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<DateTime<Utc>> {
        match self {
            CellValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}
