use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyEvolveError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Geometry Error: {0}")]
    Geometry(String),

    #[error("Worker Pool Error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Invariant Violation: {0}")]
    Invariant(String),
}

pub type KeResult<T> = Result<T, KeyEvolveError>;
