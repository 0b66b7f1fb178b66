use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Data file error")]
    Serde(#[from] serde_json::Error),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
