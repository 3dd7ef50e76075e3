pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use client::{paths, series_path, ApiClient};
pub use config::ClientConfig;
pub use error::RequestError;
pub use transport::{HttpTransport, ReqwestTransport};
