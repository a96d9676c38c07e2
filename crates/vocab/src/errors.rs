use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("id {id} is out of range for vocabulary of size {size}")]
    OutOfRange { id: usize, size: usize },

    #[error("serde_json error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("validation failed: {0}")]
    Validation(String),
}
