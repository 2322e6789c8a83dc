pub mod client;
pub mod config;
pub mod error;
pub mod service;
pub mod types;

pub use client::{ApiClient, DetectionClient, FingerprintClient};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use service::{DetectionService, FingerprintService};
pub use types::{DetectRequest, FingerprintRequest};
