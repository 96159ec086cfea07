//! # Temporal Types
//!
//! OSCAL timestamps are RFC 3339 date-times with a mandatory time zone
//! offset (`published`, `last-modified`, `collected`, `expires`, task and
//! log-entry bounds). Authorization dates are calendar dates with an
//! optional offset.
//!
//! Unlike a UTC-normalized timestamp, the offset an author wrote is part of
//! the document content and is preserved verbatim: `2024-01-15T12:00:00-05:00`
//! round-trips unchanged. Conversion to `chrono` happens only on request.

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};

use crate::error::OscalError;
use crate::patterns::FieldClass;

pattern_string! {
    /// RFC 3339 date-time with a time zone offset, held as its raw string.
    DateTimeWithTimezone => DateTime
}

pattern_string! {
    /// Calendar date with an optional time zone offset, held as its raw string.
    DateWithTimezone => Date
}

impl DateTimeWithTimezone {
    /// The current UTC time, seconds precision, `Z` suffix.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now().fixed_offset())
    }

    /// Render a `chrono` value, keeping its offset.
    pub fn from_datetime(dt: DateTime<FixedOffset>) -> Self {
        Self(dt.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    /// Parse a raw string, rejecting anything outside the pattern.
    pub fn parse(value: &str) -> Result<Self, OscalError> {
        let ts = Self::new(value);
        ts.to_datetime()?;
        Ok(ts)
    }

    /// Convert to a `chrono` value with the original offset.
    pub fn to_datetime(&self) -> Result<DateTime<FixedOffset>, OscalError> {
        if !self.is_valid() {
            return Err(OscalError::invalid(FieldClass::DateTime, &self.0));
        }
        DateTime::parse_from_rfc3339(&self.0).map_err(|e| OscalError::Timestamp {
            value: self.0.clone(),
            reason: e.to_string(),
        })
    }
}

impl DateWithTimezone {
    /// Convert to a naive calendar date, discarding any offset.
    pub fn to_naive_date(&self) -> Result<NaiveDate, OscalError> {
        if !self.is_valid() {
            return Err(OscalError::invalid(FieldClass::Date, &self.0));
        }
        let date_part = self.0.get(..10).unwrap_or(&self.0);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|e| OscalError::Timestamp {
            value: self.0.clone(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    #[test]
    fn test_now_is_valid() {
        let ts = DateTimeWithTimezone::now();
        assert!(ts.is_valid(), "now() produced {ts}");
        assert!(ts.as_str().ends_with('Z'));
    }

    #[test]
    fn test_offset_preserved() {
        let ts = DateTimeWithTimezone::parse("2024-01-15T12:00:00-05:00").unwrap();
        assert_eq!(ts.as_str(), "2024-01-15T12:00:00-05:00");
        let dt = ts.to_datetime().unwrap();
        assert_eq!(dt.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(dt.hour(), 12);
    }

    #[test]
    fn test_from_datetime_renders_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let dt = offset.with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap();
        let ts = DateTimeWithTimezone::from_datetime(dt);
        assert_eq!(ts.as_str(), "2024-06-30T23:59:59+02:00");
    }

    #[test]
    fn test_parse_rejects_missing_offset() {
        assert!(DateTimeWithTimezone::parse("2024-01-15T12:00:00").is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_calendar_date() {
        assert!(DateTimeWithTimezone::parse("2023-02-29T00:00:00Z").is_err());
    }

    #[test]
    fn test_date_to_naive() {
        let d = DateWithTimezone::new("2024-02-29-04:00");
        let naive = d.to_naive_date().unwrap();
        assert_eq!((naive.year(), naive.month(), naive.day()), (2024, 2, 29));
    }

    #[test]
    fn test_date_rejects_invalid() {
        assert!(DateWithTimezone::new("2024-02-30").to_naive_date().is_err());
    }
}
