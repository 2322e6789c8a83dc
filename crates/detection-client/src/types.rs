use phishscope_core::FeatureVector;
use serde::{Deserialize, Serialize};

/// Body of `POST /fingerprint`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerprintRequest {
    pub url: String,
}

impl FingerprintRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Body of `POST /detect`: the prefix plus every feature signal, flattened.
///
/// A reputation-only lookup sends the zero vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectRequest {
    pub prefix: String,
    #[serde(flatten)]
    pub features: FeatureVector,
}

impl DetectRequest {
    pub fn new(prefix: impl Into<String>, features: FeatureVector) -> Self {
        Self {
            prefix: prefix.into(),
            features,
        }
    }

    pub fn prefix_only(prefix: impl Into<String>) -> Self {
        Self::new(prefix, FeatureVector::default())
    }
}
