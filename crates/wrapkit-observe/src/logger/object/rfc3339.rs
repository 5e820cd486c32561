use std::fmt;

use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

use crate::logger::{
    error::{LoggerError, LoggerResult},
    object::LoggerTimeZone,
};

const INVALID_TIME: &str = "<invalid-time>";

/// RFC3339 event timestamp in the configured timezone.
///
/// The local offset is read from the cache on every event, so
/// `init_local_offset()` only needs to run once at startup.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggerRfc3339 {
    tz: LoggerTimeZone,
}

impl LoggerRfc3339 {
    pub fn new(tz: LoggerTimeZone) -> Self {
        Self { tz }
    }
}

impl FormatTime for LoggerRfc3339 {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = OffsetDateTime::now_utc().to_offset(self.tz.offset());
        write!(w, "{} ", format_timestamp(now))
    }
}

/// Formats a point in time as RFC3339, e.g. `2024-03-01T12:00:00Z`.
///
/// Values RFC3339 cannot express (years outside `0..=9999`) render as `<invalid-time>`.
pub fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|_| INVALID_TIME.to_string())
}

/// Formats milliseconds since the Unix epoch in the given timezone.
///
/// Used for build start/finish times reported by the wrapper.
///
/// # Examples
/// ```
/// use wrapkit_observe::{LoggerTimeZone, format_timestamp_millis};
///
/// let ts = format_timestamp_millis(1_700_000_000_123, LoggerTimeZone::Utc).unwrap();
/// assert_eq!(ts, "2023-11-14T22:13:20.123Z");
/// ```
pub fn format_timestamp_millis(unix_millis: i64, tz: LoggerTimeZone) -> LoggerResult<String> {
    let at = OffsetDateTime::from_unix_timestamp_nanos(i128::from(unix_millis) * 1_000_000)
        .map_err(|_| LoggerError::InvalidTimestamp(unix_millis))?;
    Ok(format_timestamp(at.to_offset(tz.offset())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Date, Month, PrimitiveDateTime, Time, UtcOffset};

    #[test]
    fn formats_utc_with_z_suffix() {
        let date = Date::from_calendar_date(2024, Month::March, 1).unwrap();
        let at = PrimitiveDateTime::new(date, Time::from_hms(12, 0, 0).unwrap()).assume_utc();
        assert_eq!(format_timestamp(at), "2024-03-01T12:00:00Z");
    }

    #[test]
    fn formats_offsets() {
        let date = Date::from_calendar_date(2024, Month::March, 1).unwrap();
        let offset = UtcOffset::from_hms(3, 30, 0).unwrap();
        let at = PrimitiveDateTime::new(date, Time::from_hms(8, 15, 0).unwrap()).assume_offset(offset);
        assert_eq!(format_timestamp(at), "2024-03-01T08:15:00+03:30");
    }

    #[test]
    fn formats_epoch_millis() {
        assert_eq!(
            format_timestamp_millis(0, LoggerTimeZone::Utc).unwrap(),
            "1970-01-01T00:00:00Z"
        );
        assert_eq!(
            format_timestamp_millis(1_700_000_000_123, LoggerTimeZone::Utc).unwrap(),
            "2023-11-14T22:13:20.123Z"
        );
    }

    #[test]
    fn rejects_out_of_range_millis() {
        let err = format_timestamp_millis(i64::MAX, LoggerTimeZone::Utc).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidTimestamp(i64::MAX)));
    }

    #[test]
    fn unrepresentable_year_renders_placeholder() {
        let date = Date::from_calendar_date(-1, Month::January, 1).unwrap();
        let at = PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc();
        assert_eq!(format_timestamp(at), INVALID_TIME);
    }
}
