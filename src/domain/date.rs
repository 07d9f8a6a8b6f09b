//! Raw date values and their normalization
//!
//! Content files carry `date` in one of three shapes: an RFC 3339-ish
//! string, a millisecond epoch timestamp, or a partial calendar object
//! (`{"year": 2020, "month": "3", "day": 15}`). [`RawDate`] models the
//! three shapes as one enum with a single normalization function
//! producing a `NaiveDateTime`.
//!
//! Month convention: a month that parses as an integer is 1-indexed
//! (`"3"` is March). The upstream JavaScript implementation subtracted 1
//! here because moment.js months are 0-indexed; chrono's calendar API is
//! 1-indexed, so the adjustment is a no-op in this crate and the value is
//! used as-is.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DateError {
    #[error("date value cannot be parsed: {0}")]
    Unparseable(String),

    #[error("date field is absent")]
    Missing,

    #[error("month is not a number in 1..=12: {0}")]
    BadMonth(String),

    #[error("calendar fields are out of range: {0}")]
    OutOfRange(String),
}

/// A `date` field as found in a content file, before normalization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    /// Milliseconds since the Unix epoch.
    Epoch(i64),

    /// A textual date or date-time.
    Text(String),

    /// Partial calendar fields with defaults for the missing parts.
    Fields(DateFields),
}

impl RawDate {
    /// Reads a raw date out of a context's JSON `date` value.
    pub fn from_value(value: &Value) -> Result<Self, DateError> {
        serde_json::from_value(value.clone()).map_err(|_| DateError::Unparseable(value.to_string()))
    }

    /// Normalizes the raw value into a canonical calendar instant.
    ///
    /// Textual inputs carrying a UTC offset are converted to their naive
    /// UTC equivalent, so mixed-offset stores compare on one axis.
    pub fn normalize(&self) -> Result<NaiveDateTime, DateError> {
        match self {
            RawDate::Epoch(millis) => DateTime::from_timestamp_millis(*millis)
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| DateError::OutOfRange(format!("epoch millis {millis}"))),
            RawDate::Text(text) => parse_text(text),
            RawDate::Fields(fields) => fields.to_instant(),
        }
    }
}

/// Partial calendar fields; `month` may arrive as a number or a numeric
/// string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DateFields {
    pub year: i32,
    pub month: MonthField,
    #[serde(default)]
    pub day: Option<u32>,
    #[serde(default)]
    pub hour: Option<u32>,
    #[serde(default)]
    pub minute: Option<u32>,
    #[serde(default)]
    pub second: Option<u32>,
}

impl DateFields {
    fn to_instant(&self) -> Result<NaiveDateTime, DateError> {
        let month = self.month.resolve()?;
        let day = self.day.unwrap_or(1);

        let date = NaiveDate::from_ymd_opt(self.year, month, day).ok_or_else(|| {
            DateError::OutOfRange(format!("{:04}-{:02}-{:02}", self.year, month, day))
        })?;

        let (hour, minute, second) = (
            self.hour.unwrap_or(0),
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
        );
        let time = NaiveTime::from_hms_opt(hour, minute, second)
            .ok_or_else(|| DateError::OutOfRange(format!("{hour:02}:{minute:02}:{second:02}")))?;

        Ok(date.and_time(time))
    }
}

/// A month component, string or number, always 1-indexed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MonthField {
    Number(u32),
    Text(String),
}

impl MonthField {
    /// Resolves to a 1-indexed month number.
    pub fn resolve(&self) -> Result<u32, DateError> {
        let month = match self {
            MonthField::Number(n) => *n,
            MonthField::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| DateError::BadMonth(s.clone()))?,
        };

        if (1..=12).contains(&month) {
            Ok(month)
        } else {
            Err(DateError::BadMonth(month.to_string()))
        }
    }
}

fn parse_text(text: &str) -> Result<NaiveDateTime, DateError> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_utc());
    }

    const DATETIME_SHAPES: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S"];
    for shape in DATETIME_SHAPES {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, shape) {
            return Ok(dt);
        }
    }

    const DATE_SHAPES: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
    for shape in DATE_SHAPES {
        if let Ok(date) = NaiveDate::parse_from_str(text, shape) {
            return Ok(date.and_time(NaiveTime::MIN));
        }
    }

    Err(DateError::Unparseable(text.to_string()))
}
