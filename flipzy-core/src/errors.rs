use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    Invalid(&'static str),
    #[error("quality must be between 0 and 5, got {0}")]
    QualityOutOfRange(i64),
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed card data: {0}")]
    Malformed(#[from] serde_json::Error),
}
