use thiserror::Error;

#[derive(Error, Debug)]
pub enum CofferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("transform failed for {name}: {message}")]
    Transform { name: String, message: String },
    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, CofferError>;
