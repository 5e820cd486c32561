use std::time::Duration;

use crate::{ModelError, ModelResult};

const NANOS_PER_MS: f64 = 1_000_000.0;
const MS_PER_SECOND: f64 = 1_000.0;
const MS_PER_MINUTE: f64 = 60.0 * MS_PER_SECOND;
const MS_PER_HOUR: f64 = 60.0 * MS_PER_MINUTE;
const MS_PER_DAY: f64 = 24.0 * MS_PER_HOUR;

/// Parses a human duration string such as `"250ms"`, `"1.5s"` or `"1h 30m"`.
///
/// The input is a sequence of `<number><unit>` terms; whitespace between
/// terms is allowed. A lone number without unit is read as milliseconds;
/// in a compound string every term needs a unit, so `"5 5"` is rejected.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use wrapkit_model::parse_duration;
///
/// assert_eq!(parse_duration("2m 30s").unwrap(), Duration::from_secs(150));
/// assert_eq!(parse_duration("40").unwrap(), Duration::from_millis(40));
/// ```
pub fn parse_duration(s: &str) -> ModelResult<Duration> {
    let input = s.trim();
    if input.is_empty() {
        return Err(ModelError::InvalidDuration("empty duration".into()));
    }

    let mut total_ms = 0.0_f64;
    let mut rest = input;
    let mut terms = 0_usize;
    while !rest.is_empty() {
        let num_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if num_end == 0 {
            return Err(ModelError::InvalidDuration(format!(
                "expected a number at {rest:?} in {s:?}"
            )));
        }
        let number: f64 = rest[..num_end]
            .parse()
            .map_err(|_| ModelError::InvalidDuration(format!("bad number in {s:?}")))?;
        rest = rest[num_end..].trim_start();

        let unit_end = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let unit = &rest[..unit_end];
        rest = rest[unit_end..].trim_start();

        if unit.is_empty() && (terms > 0 || !rest.is_empty()) {
            return Err(ModelError::InvalidDuration(format!(
                "missing unit in compound duration {s:?}"
            )));
        }
        terms += 1;

        total_ms += number * unit_millis(unit).ok_or_else(|| {
            ModelError::InvalidDuration(format!("unknown unit {unit:?} in {s:?}"))
        })?;
    }

    let nanos = (total_ms * NANOS_PER_MS).round();
    if !nanos.is_finite() || nanos > u64::MAX as f64 {
        return Err(ModelError::InvalidDuration(format!("{s:?} is out of range")));
    }
    Ok(Duration::from_nanos(nanos as u64))
}

fn unit_millis(unit: &str) -> Option<f64> {
    let ms = match unit.to_ascii_lowercase().as_str() {
        "" | "ms" | "milli" | "millis" => 1.0,
        "s" | "sec" | "secs" | "second" | "seconds" => MS_PER_SECOND,
        "m" | "min" | "mins" | "minute" | "minutes" => MS_PER_MINUTE,
        "h" | "hour" | "hours" => MS_PER_HOUR,
        "d" | "day" | "days" => MS_PER_DAY,
        _ => return None,
    };
    Some(ms)
}

/// Formats a duration for build reports.
///
/// - below one second: `"250ms"`
/// - below one minute: `"12.340s"` (milliseconds truncated, never rounded up)
/// - otherwise: `"1m05s"` or `"2h00m03s"`
pub fn format_duration(d: Duration) -> String {
    if d < Duration::from_secs(1) {
        return format!("{}ms", d.as_millis());
    }
    if d < Duration::from_secs(60) {
        return format!("{}.{:03}s", d.as_secs(), d.subsec_millis());
    }

    let total = d.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}h{minutes:02}m{seconds:02}s")
    } else {
        format!("{minutes}m{seconds:02}s")
    }
}
