use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::logger::LoggerError;

/// Validated `EnvFilter` expression, e.g. `"info"` or `"wrapkit_core=trace,warn"`.
///
/// The raw string is kept for config round-trips; validation happens once
/// on construction so [`LoggerLevel::to_env_filter`] cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct LoggerLevel(String);

impl LoggerLevel {
    /// Creates a new `LoggerLevel` from a string-like value.
    ///
    /// # Examples
    /// ```
    /// use wrapkit_observe::LoggerLevel;
    ///
    /// let lvl = LoggerLevel::new("debug").unwrap();
    /// assert_eq!(lvl.as_str(), "debug");
    /// ```
    pub fn new(s: impl Into<String>) -> Result<Self, LoggerError> {
        Self::try_from(s.into())
    }

    /// Picks a level from command-line style flags.
    ///
    /// `quiet` wins over any verbosity: it keeps warnings and errors only.
    /// Otherwise `0` is `info`, `1` is `debug`, and anything above is `trace`.
    ///
    /// # Examples
    /// ```
    /// use wrapkit_observe::LoggerLevel;
    ///
    /// assert_eq!(LoggerLevel::from_verbosity(false, 1).as_str(), "debug");
    /// assert_eq!(LoggerLevel::from_verbosity(true, 3).as_str(), "warn");
    /// ```
    pub fn from_verbosity(quiet: bool, verbose: u8) -> Self {
        let directive = match (quiet, verbose) {
            (true, _) => "warn",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        };
        Self(directive.to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the `EnvFilter` for this expression.
    pub fn to_env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(self.as_str()).expect("LoggerLevel is always valid after construction")
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self::from_verbosity(false, 0)
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for LoggerLevel {
    type Error = LoggerError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match EnvFilter::try_new(&s) {
            Ok(_) => Ok(LoggerLevel(s)),
            Err(e) => Err(LoggerError::InvalidLevel(format!("{s}: {e}"))),
        }
    }
}

impl From<LoggerLevel> for String {
    fn from(l: LoggerLevel) -> Self {
        l.0
    }
}
