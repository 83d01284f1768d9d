use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid interest score for product {id}: {score} (expected a value in [0, 1])")]
    InvalidInterestScore { id: u64, score: f64 },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Product already exists: {0}")]
    DuplicateProduct(u64),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
