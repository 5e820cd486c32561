use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt,
    layer::{Layered, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::logger::{
    config::LoggerConfig,
    error::{LoggerError, LoggerResult},
    object::LoggerFormat,
};

/// Subscriber stack every output layer sits on: registry plus the level filter.
type Filtered = Layered<EnvFilter, Registry>;

/// Builds the output layer for `cfg.format` and installs it globally.
pub(crate) fn install(cfg: &LoggerConfig) -> LoggerResult<()> {
    match cfg.format {
        LoggerFormat::Text => {
            let text = fmt::layer()
                .with_ansi(cfg.should_use_color())
                .with_target(cfg.with_targets)
                .with_timer(cfg.timer());
            install_layer(cfg, text)
        }
        LoggerFormat::Json => {
            let json = fmt::layer()
                .json()
                .with_ansi(false)
                .with_target(cfg.with_targets)
                .with_timer(cfg.timer());
            install_layer(cfg, json)
        }
        LoggerFormat::Journald => install_layer(cfg, journald_layer()?),
    }
}

#[cfg(target_os = "linux")]
fn journald_layer() -> LoggerResult<tracing_journald::Layer> {
    tracing_journald::layer().map_err(|e| LoggerError::JournaldInitFailed(e.to_string()))
}

#[cfg(not(target_os = "linux"))]
fn journald_layer() -> LoggerResult<tracing_subscriber::layer::Identity> {
    Err(LoggerError::JournaldNotSupported)
}

/// Puts `output` on top of the filtered registry and makes it the global default.
fn install_layer<L>(cfg: &LoggerConfig, output: L) -> LoggerResult<()>
where
    L: Layer<Filtered> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(cfg.level.to_env_filter())
        .with(output)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)
}
