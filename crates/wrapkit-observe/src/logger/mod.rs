mod config;
mod error;
mod install;
mod object;

pub use config::LoggerConfig;
pub use error::{LoggerError, LoggerResult};
pub use object::{
    LoggerFormat, LoggerLevel, LoggerRfc3339, LoggerTimeZone, format_timestamp,
    format_timestamp_millis, init_local_offset,
};

/// Installs the global tracing subscriber for the given configuration.
///
/// Can be called once per process; later calls return
/// [`LoggerError::AlreadyInitialized`].
///
/// For `LoggerTimeZone::Local`, call [`init_local_offset`] first, before
/// any threads are started.
///
/// # Examples
/// ```rust
/// use wrapkit_observe::{LoggerConfig, init_logger};
///
/// let config = LoggerConfig::from_verbosity(false, 1);
/// init_logger(&config).expect("Failed to initialize logger");
///
/// tracing::debug!("logger ready");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    install::install(cfg)
}
