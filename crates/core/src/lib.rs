//! Domain model for the phishing check workflow.
//!
//! The types here are shared by the HTTP clients, the phase orchestrator and
//! the event stream consumed by presentation adapters.

pub mod canonical;
pub mod domain;
pub mod error;

pub use canonical::{canonical_preview, require_url};
pub use domain::*;
pub use error::{CoreError, Result};
