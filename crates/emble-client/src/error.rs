use emble_types::ValidationError;
use thiserror::Error;

/// Every way a backend call can fail. All variants carry the request path.
#[derive(Error, Debug, Clone)]
pub enum RequestError {
    #[error("Request to {path} failed: {message}")]
    Transport { path: String, message: String },

    #[error("Request to {path} returned HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("Could not encode request body for {path}: {message}")]
    Encode { path: String, message: String },

    #[error("Could not decode response from {path}: {message}")]
    Decode { path: String, message: String },

    #[error("Response from {path} failed validation: {source}")]
    Validation {
        path: String,
        #[source]
        source: ValidationError,
    },

    #[error("Invalid URL for {path}: {message}")]
    InvalidUrl { path: String, message: String },
}

impl RequestError {
    pub fn path(&self) -> &str {
        match self {
            Self::Transport { path, .. }
            | Self::Status { path, .. }
            | Self::Encode { path, .. }
            | Self::Decode { path, .. }
            | Self::Validation { path, .. }
            | Self::InvalidUrl { path, .. } => path,
        }
    }

    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RequestError>;
