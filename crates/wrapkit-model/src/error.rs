use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid property at line {line}: {reason}")]
    InvalidProperty { line: usize, reason: String },

    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ModelResult<T> = Result<T, ModelError>;
