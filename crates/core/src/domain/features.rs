use serde::{Deserialize, Serialize};

/// Signals describing a URL's domain, transport and lexical shape.
///
/// Fields absent from a payload decode to zero / `false`, which is also the
/// shape sent with a prefix-only reputation lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(default)]
pub struct FeatureVector {
    pub domain_age_days: i64,
    #[serde(with = "flag")]
    #[cfg_attr(feature = "typescript", ts(type = "number"))]
    pub tls_valid: bool,
    pub redirect_count: u32,
    #[serde(with = "flag")]
    #[cfg_attr(feature = "typescript", ts(type = "number"))]
    pub suspicious_js: bool,
    pub url_length: u32,
    pub dot_count: u32,
    pub hyphen_count: u32,
    pub digit_ratio: f64,
    #[serde(with = "flag")]
    #[cfg_attr(feature = "typescript", ts(type = "number"))]
    pub has_at: bool,
    pub entropy: f64,
}

impl FeatureVector {
    /// True when every signal holds its zero value.
    pub fn is_zeroed(&self) -> bool {
        *self == Self::default()
    }
}

/// `0|1` on the wire; decodes from integers, floats, booleans or `null`.
mod flag {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        deserializer.deserialize_any(FlagVisitor)
    }

    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("0, 1 or a boolean")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<bool, E> {
            Ok(v != 0.0)
        }

        fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_none<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default_to_zero() {
        let features: FeatureVector =
            serde_json::from_value(json!({ "domain_age_days": 12, "tls_valid": 1 })).unwrap();

        assert_eq!(features.domain_age_days, 12);
        assert!(features.tls_valid);
        assert_eq!(features.redirect_count, 0);
        assert!(!features.suspicious_js);
        assert_eq!(features.entropy, 0.0);
    }

    #[test]
    fn test_flags_accept_bool_and_null() {
        let features: FeatureVector = serde_json::from_value(json!({
            "tls_valid": true,
            "suspicious_js": null,
            "has_at": 0
        }))
        .unwrap();

        assert!(features.tls_valid);
        assert!(!features.suspicious_js);
        assert!(!features.has_at);
    }

    #[test]
    fn test_flags_serialize_as_integers() {
        let features = FeatureVector {
            tls_valid: true,
            ..Default::default()
        };
        let value = serde_json::to_value(&features).unwrap();

        assert_eq!(value["tls_valid"], json!(1));
        assert_eq!(value["has_at"], json!(0));
        assert_eq!(value["digit_ratio"], json!(0.0));
    }

    #[test]
    fn test_is_zeroed() {
        assert!(FeatureVector::default().is_zeroed());
        let features = FeatureVector {
            dot_count: 3,
            ..Default::default()
        };
        assert!(!features.is_zeroed());
    }
}
