use thiserror::Error;
use wrapkit_model::ModelError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no tokio runtime available to schedule the alarm")]
    NoRuntime,

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("cannot convert value for printing: {0}")]
    Convert(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
