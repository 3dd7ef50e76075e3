use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionStoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt session store: {0}")]
    Corrupt(serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, SessionStoreError>;
