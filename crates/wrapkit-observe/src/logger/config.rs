use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

use crate::logger::object::{LoggerFormat, LoggerLevel, LoggerRfc3339, LoggerTimeZone};

/// Logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output format.
    pub format: LoggerFormat,
    /// Log level filter expression (e.g., "info", "wrapkit_core=debug,info").
    pub level: LoggerLevel,
    /// Timezone for timestamps.
    pub tz: LoggerTimeZone,
    /// Whether to include module/target names in log output.
    pub with_targets: bool,
    /// Whether to use colored output.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Config for the usual `-q` / `-v` command-line flags, other fields defaulted.
    pub fn from_verbosity(quiet: bool, verbose: u8) -> Self {
        Self {
            level: LoggerLevel::from_verbosity(quiet, verbose),
            ..Default::default()
        }
    }

    /// Color is used only when enabled in config and stdout is a terminal.
    ///
    /// Call during logger initialization, not config parsing, so the
    /// terminal check reflects the actual output.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }

    pub(crate) fn timer(&self) -> LoggerRfc3339 {
        LoggerRfc3339::new(self.tz)
    }
}
