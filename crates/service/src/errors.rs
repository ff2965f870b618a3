use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("no file was uploaded")]
    NoPayloadProvided,
    #[error("file not found: {0}")]
    FileNotFound(String),
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl ServiceError {
    pub fn file_not_found(key: &str) -> Self { Self::FileNotFound(key.to_string()) }
}
