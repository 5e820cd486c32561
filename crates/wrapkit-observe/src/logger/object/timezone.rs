use std::{
    fmt,
    str::FromStr,
    sync::{OnceLock, RwLock},
};

use serde::{Deserialize, Serialize};
use time::UtcOffset;

use crate::logger::error::LoggerError;

/// Cached local UTC offset, written by `init_local_offset()` or on first use.
static LOCAL_OFFSET: RwLock<UtcOffset> = RwLock::new(UtcOffset::UTC);

/// Set once local offset detection has been attempted.
static INIT_DONE: OnceLock<()> = OnceLock::new();

/// Timezone for rendered timestamps.
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoggerTimeZone {
    #[default]
    Utc,
    Local,
}

impl LoggerTimeZone {
    /// Offset to apply when rendering a timestamp in this zone.
    pub fn offset(self) -> UtcOffset {
        match self {
            LoggerTimeZone::Utc => UtcOffset::UTC,
            LoggerTimeZone::Local => get_or_detect_local_offset(),
        }
    }
}

impl FromStr for LoggerTimeZone {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utc" | "z" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            _ => Err(LoggerError::InvalidTimeZone(s.to_string())),
        }
    }
}

impl fmt::Display for LoggerTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoggerTimeZone::Utc => "utc",
            LoggerTimeZone::Local => "local",
        })
    }
}

/// Detects and caches the local timezone offset.
///
/// **Call in `main()` before spawning any threads.** Offset detection is
/// refused in multi-threaded processes on most Unix platforms, in which
/// case timestamps fall back to UTC.
///
/// # Example
/// ```no_run
/// use wrapkit_observe::{LoggerConfig, LoggerTimeZone, init_local_offset, init_logger};
///
/// fn main() {
///     init_local_offset();
///     let cfg = LoggerConfig { tz: LoggerTimeZone::Local, ..Default::default() };
///     init_logger(&cfg).unwrap();
/// }
/// ```
pub fn init_local_offset() {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    if let Ok(mut guard) = LOCAL_OFFSET.write() {
        *guard = offset;
    }
    let _ = INIT_DONE.set(());
}

/// Returns the cached local offset, detecting it on first use.
pub(crate) fn get_or_detect_local_offset() -> UtcOffset {
    INIT_DONE.get_or_init(|| match UtcOffset::current_local_offset() {
        Ok(detected) => {
            if let Ok(mut guard) = LOCAL_OFFSET.write() {
                *guard = detected;
            }
        }
        Err(_) => {
            eprintln!(
                "WARNING: wrapkit-observe local timezone detection failed. \
                 Call init_local_offset() in main() before starting threads. \
                 Falling back to UTC."
            );
        }
    });

    LOCAL_OFFSET.read().map(|guard| *guard).unwrap_or(UtcOffset::UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_utc() {
        assert_eq!(LoggerTimeZone::default(), LoggerTimeZone::Utc);
    }

    #[test]
    fn parses_case_insensitive() {
        assert_eq!("UTC".parse::<LoggerTimeZone>().unwrap(), LoggerTimeZone::Utc);
        assert_eq!("z".parse::<LoggerTimeZone>().unwrap(), LoggerTimeZone::Utc);
        assert_eq!(" Local ".parse::<LoggerTimeZone>().unwrap(), LoggerTimeZone::Local);
    }

    #[test]
    fn rejects_invalid_timezone() {
        assert!(matches!(
            "pst".parse::<LoggerTimeZone>(),
            Err(LoggerError::InvalidTimeZone(_))
        ));
        assert!("".parse::<LoggerTimeZone>().is_err());
    }

    #[test]
    fn utc_offset_is_zero() {
        assert_eq!(LoggerTimeZone::Utc.offset(), UtcOffset::UTC);
    }

    #[test]
    fn local_offset_is_sane_after_init() {
        init_local_offset();
        let offset = LoggerTimeZone::Local.offset();
        assert!(offset.whole_hours().abs() <= 14);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&LoggerTimeZone::Local).unwrap(), r#""local""#);
        let tz: LoggerTimeZone = serde_json::from_str(r#""utc""#).unwrap();
        assert_eq!(tz, LoggerTimeZone::Utc);
    }
}
