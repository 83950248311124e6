use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum EngineError {
    #[error("Load error: {0}")]
    LoadError(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Seek error: {0}")]
    SeekError(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
