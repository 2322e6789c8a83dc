//! Contracts of the two remote collaborators.
//!
//! The orchestrator only sees these traits, so the HTTP clients can be
//! swapped for in-process implementations.

use async_trait::async_trait;
use phishscope_core::{DetectionVerdict, FeatureVector, Fingerprint};

use crate::error::Result;

/// Canonicalizes a URL remotely and returns its fingerprint and features.
#[async_trait]
pub trait FingerprintService: Send + Sync {
    /// `url` must be non-empty. Fails on any transport error or non-2xx
    /// status; never returns a partial fingerprint.
    async fn fingerprint(&self, url: &str) -> Result<Fingerprint>;
}

/// Classifies a fingerprint prefix, optionally with its feature vector.
#[async_trait]
pub trait DetectionService: Send + Sync {
    /// `prefix` must be non-empty. A zeroed `features` asks for a
    /// reputation-only lookup.
    async fn detect(&self, prefix: &str, features: &FeatureVector) -> Result<DetectionVerdict>;
}
