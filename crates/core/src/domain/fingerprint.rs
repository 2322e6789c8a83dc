use serde::{Deserialize, Serialize};

use crate::domain::FeatureVector;
use crate::error::{CoreError, Result};

/// Privacy-preserving stand-in for a URL, as returned by `/fingerprint`.
///
/// The feature signals travel flattened next to the digest on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Fingerprint {
    pub fingerprint: String,
    pub prefix: String,
    #[serde(flatten)]
    pub features: FeatureVector,
}

impl Fingerprint {
    pub fn new(
        fingerprint: impl Into<String>,
        prefix: impl Into<String>,
        features: FeatureVector,
    ) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            prefix: prefix.into(),
            features,
        }
    }

    /// Confirms the digest and lookup prefix are both present.
    pub fn ensure_prefix(&self) -> Result<&str> {
        if self.fingerprint.trim().is_empty() {
            return Err(CoreError::Contract("fingerprint is empty".to_string()));
        }
        if self.prefix.trim().is_empty() {
            return Err(CoreError::Contract("prefix is empty".to_string()));
        }
        Ok(&self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_flattened_response() {
        let fp: Fingerprint = serde_json::from_value(json!({
            "fingerprint": "9f86d081884c7d65",
            "prefix": "9f86d0",
            "domain_age_days": 5,
            "tls_valid": 0,
            "redirect_count": 1,
            "suspicious_js": 1
        }))
        .unwrap();

        assert_eq!(fp.prefix, "9f86d0");
        assert_eq!(fp.features.domain_age_days, 5);
        assert!(fp.features.suspicious_js);
        assert_eq!(fp.features.url_length, 0);
    }

    #[test]
    fn test_ensure_prefix() {
        let fp = Fingerprint::new("abc123", "abc", FeatureVector::default());
        assert_eq!(fp.ensure_prefix().unwrap(), "abc");

        let missing = Fingerprint::new("abc123", "  ", FeatureVector::default());
        assert!(matches!(
            missing.ensure_prefix(),
            Err(CoreError::Contract(_))
        ));
    }
}
