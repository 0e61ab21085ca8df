use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScatterError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("lookup failed: {0}")]
    Lookup(String),
    #[error("mismatch: {0}")]
    Mismatch(String),
}

pub type ScatterResult<T> = Result<T, ScatterError>;
